// ABOUTME: User management module
// ABOUTME: Provides types and storage for role-scoped accounts

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
