// ABOUTME: User type definitions
// ABOUTME: Role-scoped accounts plus create and partial-update inputs

use archive_core::validation::{check_length, non_blank, require_text};
use archive_core::{Role, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 255;
pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 255;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 1024;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateInput {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

/// Validated form of [`UserCreateInput`]
#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl UserCreateInput {
    pub(crate) fn validate(&self) -> Result<NewUser, ValidationError> {
        let username = require_text(self.username.as_deref(), "Username")?;
        check_length(&username, "Username", MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH)?;

        let first_name = require_text(self.first_name.as_deref(), "First name")?;
        check_length(&first_name, "First name", MIN_NAME_LENGTH, MAX_NAME_LENGTH)?;

        let last_name = require_text(self.last_name.as_deref(), "Last name")?;
        check_length(&last_name, "Last name", MIN_NAME_LENGTH, MAX_NAME_LENGTH)?;

        // Passwords are not trimmed; surrounding spaces are part of the secret
        let password = self
            .password
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or(ValidationError::Required("Password"))?;
        check_length(&password, "Password", MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH)?;

        Ok(NewUser {
            username,
            first_name,
            last_name,
            password,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateInput {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

impl UserUpdateInput {
    /// Normalize the input: blank fields mean "keep the current value"
    pub(crate) fn validate(self) -> Result<UserUpdateInput, ValidationError> {
        let username = non_blank(self.username);
        if let Some(username) = &username {
            check_length(username, "Username", MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH)?;
        }

        let first_name = non_blank(self.first_name);
        if let Some(first_name) = &first_name {
            check_length(first_name, "First name", MIN_NAME_LENGTH, MAX_NAME_LENGTH)?;
        }

        let last_name = non_blank(self.last_name);
        if let Some(last_name) = &last_name {
            check_length(last_name, "Last name", MIN_NAME_LENGTH, MAX_NAME_LENGTH)?;
        }

        let password = self.password.filter(|p| !p.is_empty());
        if let Some(password) = &password {
            check_length(password, "Password", MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH)?;
        }

        Ok(UserUpdateInput {
            username,
            first_name,
            last_name,
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input() -> UserCreateInput {
        UserCreateInput {
            username: Some("  jdelacruz ".to_string()),
            first_name: Some("Juan".to_string()),
            last_name: Some("Dela Cruz".to_string()),
            password: Some("secret123".to_string()),
        }
    }

    #[test]
    fn test_create_input_trims_names() {
        let new_user = create_input().validate().unwrap();
        assert_eq!(new_user.username, "jdelacruz");
        assert_eq!(new_user.password, "secret123");
    }

    #[test]
    fn test_create_input_requires_password() {
        let mut input = create_input();
        input.password = Some(String::new());
        assert_eq!(input.validate().unwrap_err(), ValidationError::Required("Password"));
    }

    #[test]
    fn test_create_input_rejects_short_username() {
        let mut input = create_input();
        input.username = Some("ab".to_string());
        assert!(matches!(
            input.validate(),
            Err(ValidationError::TooShort { field: "Username", min: 3 })
        ));
    }

    #[test]
    fn test_update_input_blank_password_is_ignored() {
        let input = UserUpdateInput {
            password: Some(String::new()),
            first_name: Some("   ".to_string()),
            ..Default::default()
        };
        let normalized = input.validate().unwrap();
        assert!(normalized.password.is_none());
        assert!(normalized.first_name.is_none());
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User {
            id: "user-1".to_string(),
            username: "admin".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Reyes".to_string(),
            role: Role::Admin,
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["role"], "admin");
    }
}
