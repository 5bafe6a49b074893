// ABOUTME: Input validation for system settings
// ABOUTME: Non-blank text fields and bounded lengths

use archive_core::validation::{check_length, non_blank, require_text};
use archive_core::ValidationError;

use crate::types::SettingsUpdate;

pub const MAX_SCHOOL_NAME_LENGTH: usize = 255;
pub const MAX_ABOUT_LENGTH: usize = 10_000;
pub const MAX_IMAGE_REF_LENGTH: usize = 2048;

/// Settings update with every supplied field checked and trimmed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedUpdate {
    pub school_name: Option<String>,
    pub school_logo: Option<Option<String>>,
    pub header_background: Option<Option<String>>,
    pub about_content: Option<String>,
}

pub fn validate_update(update: SettingsUpdate) -> Result<ValidatedUpdate, ValidationError> {
    let school_name = match update.school_name.as_deref() {
        Some(raw) => {
            let name = require_text(Some(raw), "School name")?;
            check_length(&name, "School name", 1, MAX_SCHOOL_NAME_LENGTH)?;
            Some(name)
        }
        None => None,
    };

    let about_content = match update.about_content.as_deref() {
        Some(raw) => {
            let about = require_text(Some(raw), "About content")?;
            check_length(&about, "About content", 1, MAX_ABOUT_LENGTH)?;
            Some(about)
        }
        None => None,
    };

    Ok(ValidatedUpdate {
        school_name,
        school_logo: image_ref(update.school_logo, "School logo")?,
        header_background: image_ref(update.header_background, "Header background")?,
        about_content,
    })
}

fn image_ref(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<Option<String>>, ValidationError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let cleaned = non_blank(Some(raw));
    if let Some(reference) = &cleaned {
        check_length(reference, field, 1, MAX_IMAGE_REF_LENGTH)?;
    }
    Ok(Some(cleaned))
}
