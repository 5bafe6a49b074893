// ABOUTME: Storage operations for system settings
// ABOUTME: Reads and partially updates the singleton settings row

use archive_storage::StorageError;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, SqlitePool};
use tracing::{debug, info};

use crate::types::{SettingsUpdate, SystemSettings};
use crate::validation::validate_update;

#[derive(Clone)]
pub struct SettingsStorage {
    pool: SqlitePool,
}

impl SettingsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the settings row seeded by the initial migration
    pub async fn get(&self) -> Result<SystemSettings, StorageError> {
        let row = sqlx::query(
            "SELECT school_name, school_logo, header_background, about_content, updated_at \
             FROM system_settings WHERE id = 1",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::from_query)?;

        self.row_to_settings(&row)
    }

    /// Apply a partial update and return the stored result
    pub async fn update(&self, update: SettingsUpdate) -> Result<SystemSettings, StorageError> {
        let update = validate_update(update)?;
        debug!("Updating system settings: {:?}", update);

        let mut query_builder = QueryBuilder::new("UPDATE system_settings SET updated_at = ");
        query_builder.push_bind(Utc::now());

        if let Some(school_name) = update.school_name {
            query_builder.push(", school_name = ");
            query_builder.push_bind(school_name);
        }
        if let Some(school_logo) = update.school_logo {
            query_builder.push(", school_logo = ");
            query_builder.push_bind(school_logo);
        }
        if let Some(header_background) = update.header_background {
            query_builder.push(", header_background = ");
            query_builder.push_bind(header_background);
        }
        if let Some(about_content) = update.about_content {
            query_builder.push(", about_content = ");
            query_builder.push_bind(about_content);
        }

        query_builder.push(" WHERE id = 1");

        let result = query_builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        info!("System settings updated");
        self.get().await
    }

    fn row_to_settings(&self, row: &SqliteRow) -> Result<SystemSettings, StorageError> {
        Ok(SystemSettings {
            school_name: row.try_get("school_name")?,
            school_logo: row.try_get("school_logo")?,
            header_background: row.try_get("header_background")?,
            about_content: row.try_get("about_content")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
