// ABOUTME: Core types, constants, and utilities for the thesis archive
// ABOUTME: Foundational package providing shared functionality across all archive packages

pub mod constants;
pub mod pagination;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{Department, ParseEnumError, Role, ThesisStatus};

// Re-export constants
pub use constants::{archive_dir, DEFAULT_SHELF_LOCATION, MAX_PDF_SIZE, PDF_MIME_TYPE};

// Re-export pagination
pub use pagination::{Page, PaginationParams};

// Re-export utilities
pub use utils::generate_id;

// Re-export validation
pub use validation::ValidationError;
