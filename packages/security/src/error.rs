use archive_core::ValidationError;
use archive_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecurityError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Token signing failed: {0}")]
    TokenSigning(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}
