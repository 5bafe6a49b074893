use std::env;
use std::path::PathBuf;

/// Maximum accepted size of an uploaded thesis PDF (50 MB)
pub const MAX_PDF_SIZE: usize = 50 * 1024 * 1024;

/// The only content type accepted for thesis uploads
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Shelf location recorded for student submissions that omit one
pub const DEFAULT_SHELF_LOCATION: &str = "N/A";

/// Get the path to the archive data directory (~/.thesis-archive)
pub fn archive_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".thesis-archive")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".thesis-archive")
    }
}
