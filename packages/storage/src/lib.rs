// ABOUTME: Data layer for the thesis archive
// ABOUTME: Storage errors, SQLite pool setup, and embedded schema migrations

use archive_core::ValidationError;
use thiserror::Error;

pub mod db;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use db::{connect, run_migrations, DatabaseConfig};

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Duplicate value: {0}")]
    Duplicate(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Map a query failure, surfacing missing rows and unique violations
    /// as their own variants
    pub fn from_query(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StorageError::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StorageError::Duplicate(db_err.message().to_string())
            }
            other => StorageError::Sqlx(other),
        }
    }
}

impl From<ValidationError> for StorageError {
    fn from(err: ValidationError) -> Self {
        StorageError::Validation(err.to_string())
    }
}
