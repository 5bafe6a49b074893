// ABOUTME: Program storage layer using SQLite
// ABOUTME: CRUD for academic programs, unique by name within a department

use archive_core::{generate_id, Department};
use archive_storage::StorageError;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, SqlitePool};
use tracing::{debug, info};

use super::types::{Program, ProgramCreateInput, ProgramUpdateInput};

const PROGRAM_COLUMNS: &str = "id, name, department, description, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct ProgramStorage {
    pool: SqlitePool,
}

impl ProgramStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List programs ordered by department then name
    pub async fn list_programs(
        &self,
        department: Option<Department>,
        include_inactive: bool,
    ) -> Result<Vec<Program>, StorageError> {
        debug!(
            "Fetching programs (department: {:?}, include_inactive: {})",
            department, include_inactive
        );

        let mut query_builder =
            QueryBuilder::new(format!("SELECT {} FROM programs WHERE 1 = 1", PROGRAM_COLUMNS));
        if let Some(department) = department {
            query_builder.push(" AND department = ");
            query_builder.push_bind(department.as_str());
        }
        if !include_inactive {
            query_builder.push(" AND is_active = 1");
        }
        query_builder.push(" ORDER BY department ASC, name ASC");

        let rows = query_builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter()
            .map(|row| self.row_to_program(row))
            .collect::<Result<Vec<_>, _>>()
    }

    pub async fn get_program(&self, program_id: &str) -> Result<Program, StorageError> {
        debug!("Fetching program: {}", program_id);

        let row = sqlx::query(&format!("SELECT {} FROM programs WHERE id = ?", PROGRAM_COLUMNS))
            .bind(program_id)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from_query)?;

        self.row_to_program(&row)
    }

    pub async fn create_program(&self, input: ProgramCreateInput) -> Result<Program, StorageError> {
        let input = input.validate()?;
        let program_id = generate_id("program");
        let now = Utc::now();

        debug!("Creating program: {} (name: {})", program_id, input.name);

        sqlx::query(
            r#"
            INSERT INTO programs (id, name, department, description, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&program_id)
        .bind(&input.name)
        .bind(input.department.as_str())
        .bind(&input.description)
        .bind(input.is_active)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| duplicate_name(e, &input.name, input.department))?;

        info!("Created program {} in {}", program_id, input.department);
        self.get_program(&program_id).await
    }

    pub async fn update_program(
        &self,
        program_id: &str,
        input: ProgramUpdateInput,
    ) -> Result<Program, StorageError> {
        let current = self.get_program(program_id).await?;
        let input = input.validate()?;

        debug!("Updating program: {}", program_id);

        let mut query_builder = QueryBuilder::new("UPDATE programs SET updated_at = ");
        query_builder.push_bind(Utc::now());

        if let Some(name) = &input.name {
            query_builder.push(", name = ");
            query_builder.push_bind(name.clone());
        }
        if let Some(department) = input.department {
            query_builder.push(", department = ");
            query_builder.push_bind(department.as_str());
        }
        if let Some(description) = &input.description {
            query_builder.push(", description = ");
            query_builder.push_bind((!description.is_empty()).then(|| description.clone()));
        }
        if let Some(is_active) = input.is_active {
            query_builder.push(", is_active = ");
            query_builder.push_bind(is_active);
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(program_id.to_string());

        let name = input.name.as_deref().unwrap_or(&current.name);
        let department = input.department.unwrap_or(current.department);
        query_builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| duplicate_name(e, name, department))?;

        self.get_program(program_id).await
    }

    pub async fn delete_program(&self, program_id: &str) -> Result<(), StorageError> {
        debug!("Deleting program: {}", program_id);

        let result = sqlx::query("DELETE FROM programs WHERE id = ?")
            .bind(program_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        info!("Deleted program {}", program_id);
        Ok(())
    }

    fn row_to_program(&self, row: &SqliteRow) -> Result<Program, StorageError> {
        let department: String = row.try_get("department")?;
        let department = department
            .parse::<Department>()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(Program {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            department,
            description: row.try_get("description")?,
            is_active: row.try_get::<i64, _>("is_active")? != 0,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

fn duplicate_name(err: sqlx::Error, name: &str, department: Department) -> StorageError {
    match StorageError::from_query(err) {
        StorageError::Duplicate(_) => StorageError::Duplicate(format!(
            "Program '{}' already exists in {}",
            name, department
        )),
        other => other,
    }
}
