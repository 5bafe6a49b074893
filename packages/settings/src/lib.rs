// ABOUTME: System settings for the thesis archive
// ABOUTME: The single row of institution branding shown on public pages

pub mod storage;
pub mod types;
pub mod validation;

pub use storage::SettingsStorage;
pub use types::{SettingsUpdate, SystemSettings};
