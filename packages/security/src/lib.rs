// ABOUTME: Security and account management for the thesis archive
// ABOUTME: Provides user storage, password hashing, and bearer token signing

pub mod error;
pub mod password;
pub mod tokens;
pub mod users;

// Re-export main types for convenience
pub use error::SecurityError;
pub use password::{hash_password, verify_password};
pub use tokens::{Claims, TokenService};
pub use users::storage::UserStorage;
pub use users::{User, UserCreateInput, UserUpdateInput};
