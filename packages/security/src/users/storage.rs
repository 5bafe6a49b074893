// ABOUTME: User storage layer using SQLite
// ABOUTME: Role-scoped CRUD for accounts and credential verification

use archive_core::validation::{check_length, require_text};
use archive_core::{generate_id, Role, ValidationError};
use archive_storage::StorageError;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, SqlitePool};
use tracing::{debug, info, warn};

use super::types::{
    User, UserCreateInput, UserUpdateInput, MAX_PASSWORD_LENGTH, MAX_USERNAME_LENGTH,
    MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH,
};
use crate::password::{hash_password, verify_password};
use crate::SecurityError;

const USER_COLUMNS: &str =
    "id, username, password_hash, first_name, last_name, role, created_at, updated_at";

#[derive(Clone)]
pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every account holding `role`, sorted by name
    pub async fn list_users(&self, role: Role) -> Result<Vec<User>, SecurityError> {
        debug!("Listing users with role: {}", role);

        let rows = sqlx::query(&format!(
            "SELECT {} FROM users WHERE role = ? ORDER BY last_name ASC, first_name ASC",
            USER_COLUMNS
        ))
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter()
            .map(|row| self.row_to_user(row))
            .collect::<Result<Vec<_>, _>>()
            .map_err(SecurityError::from)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, SecurityError> {
        debug!("Fetching user: {}", user_id);

        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from_query)?;

        Ok(self.row_to_user(&row)?)
    }

    /// Fetch a user, treating a role mismatch the same as a missing row
    pub async fn get_user_with_role(&self, user_id: &str, role: Role) -> Result<User, SecurityError> {
        let user = self.get_user(user_id).await?;
        if user.role != role {
            return Err(StorageError::NotFound.into());
        }
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, SecurityError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE username = ?",
            USER_COLUMNS
        ))
        .bind(username.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => Ok(Some(self.row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn create_user(
        &self,
        role: Role,
        input: UserCreateInput,
    ) -> Result<User, SecurityError> {
        let new_user = input.validate()?;
        let password_hash = hash_password(&new_user.password)?;
        let id = generate_id("user");
        let now = Utc::now();

        debug!("Creating {} account: {}", role, new_user.username);

        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, first_name, last_name, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&new_user.username)
        .bind(&password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(role.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &new_user.username))?;

        info!("Created {} account {}", role, id);
        self.get_user(&id).await
    }

    pub async fn update_user(
        &self,
        user_id: &str,
        role: Role,
        input: UserUpdateInput,
    ) -> Result<User, SecurityError> {
        let current = self.get_user_with_role(user_id, role).await?;
        let input = input.validate()?;

        debug!("Updating user: {}", user_id);

        // Column names are literals; every value goes through push_bind
        let mut query_builder = QueryBuilder::new("UPDATE users SET updated_at = ");
        query_builder.push_bind(Utc::now());

        if let Some(username) = &input.username {
            query_builder.push(", username = ");
            query_builder.push_bind(username);
        }
        if let Some(first_name) = &input.first_name {
            query_builder.push(", first_name = ");
            query_builder.push_bind(first_name);
        }
        if let Some(last_name) = &input.last_name {
            query_builder.push(", last_name = ");
            query_builder.push_bind(last_name);
        }
        if let Some(password) = &input.password {
            query_builder.push(", password_hash = ");
            query_builder.push_bind(hash_password(password)?);
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(user_id);

        let attempted_username = input.username.as_deref().unwrap_or(&current.username);
        query_builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_write_error(e, attempted_username))?;

        self.get_user(user_id).await
    }

    /// Rename the account that owns `user_id`, whatever its role
    pub async fn change_username(&self, user_id: &str, username: &str) -> Result<User, SecurityError> {
        let username = require_text(Some(username), "Username")?;
        check_length(&username, "Username", MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH)?;

        debug!("Changing username for user: {}", user_id);

        let result = sqlx::query("UPDATE users SET username = ?, updated_at = ? WHERE id = ?")
            .bind(&username)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_write_error(e, &username))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound.into());
        }

        info!("User {} changed their username", user_id);
        self.get_user(user_id).await
    }

    /// Replace the password after checking the current one
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), SecurityError> {
        if current_password.is_empty() {
            return Err(ValidationError::Required("Current password").into());
        }
        check_length(new_password, "Password", MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH)?;

        let user = self.get_user(user_id).await?;
        if !verify_password(current_password, &user.password_hash) {
            warn!("Rejected password change for user {}: wrong current password", user_id);
            return Err(SecurityError::IncorrectPassword);
        }

        sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(hash_password(new_password)?)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        info!("User {} changed their password", user_id);
        Ok(())
    }

    pub async fn delete_user(&self, user_id: &str, role: Role) -> Result<(), SecurityError> {
        debug!("Deleting user: {}", user_id);

        let result = sqlx::query("DELETE FROM users WHERE id = ? AND role = ?")
            .bind(user_id)
            .bind(role.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound.into());
        }

        info!("Deleted user {}", user_id);
        Ok(())
    }

    /// Look up a user by username and check the password.
    /// Returns `None` for an unknown username or a wrong password alike.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, SecurityError> {
        let Some(user) = self.find_by_username(username).await? else {
            return Ok(None);
        };

        if verify_password(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    fn map_write_error(err: sqlx::Error, username: &str) -> SecurityError {
        match StorageError::from_query(err) {
            StorageError::Duplicate(_) => SecurityError::DuplicateUsername(username.to_string()),
            other => other.into(),
        }
    }

    fn row_to_user(&self, row: &SqliteRow) -> Result<User, StorageError> {
        let role: String = row.try_get("role")?;
        let role = role
            .parse::<Role>()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            role,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
