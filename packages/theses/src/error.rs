use archive_core::{ParseEnumError, ThesisStatus, ValidationError};
use archive_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThesisError {
    #[error("Thesis not found")]
    NotFound,

    #[error("{0}")]
    Forbidden(String),

    #[error("Cannot {action} a thesis that is already {from}")]
    InvalidTransition {
        from: ThesisStatus,
        action: &'static str,
    },

    #[error("No fields to update")]
    NothingToUpdate,

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ParseEnumError> for ThesisError {
    fn from(err: ParseEnumError) -> Self {
        ThesisError::InvalidInput(err.to_string())
    }
}

impl From<sqlx::Error> for ThesisError {
    fn from(err: sqlx::Error) -> Self {
        match StorageError::from_query(err) {
            StorageError::NotFound => ThesisError::NotFound,
            other => ThesisError::Storage(other),
        }
    }
}
