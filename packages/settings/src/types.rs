// ABOUTME: Type definitions for system settings
// ABOUTME: The branding record and its partial update

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    pub school_name: String,
    pub school_logo: Option<String>,
    pub header_background: Option<String>,
    pub about_content: String,
    pub updated_at: DateTime<Utc>,
}

/// Fields to change; omitted fields keep their current value.
/// Blank `schoolLogo` or `headerBackground` clears the image.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub school_name: Option<String>,
    pub school_logo: Option<String>,
    pub header_background: Option<String>,
    pub about_content: Option<String>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.school_name.is_none()
            && self.school_logo.is_none()
            && self.header_background.is_none()
            && self.about_content.is_none()
    }
}
