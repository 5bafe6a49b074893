// ABOUTME: Program type definitions
// ABOUTME: Catalogue entries plus create, update, and listing inputs

use archive_core::validation::{check_length, non_blank, require_text};
use archive_core::{Department, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_PROGRAM_NAME_LENGTH: usize = 3;
pub const MAX_PROGRAM_NAME_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub name: String,
    pub department: Department,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramCreateInput {
    pub name: String,
    pub department: Department,
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl ProgramCreateInput {
    pub fn new(name: impl Into<String>, department: Department) -> Self {
        Self {
            name: name.into(),
            department,
            description: None,
            is_active: true,
        }
    }

    pub(crate) fn validate(self) -> Result<Self, ValidationError> {
        let name = require_text(Some(self.name.as_str()), "Program name")?;
        check_length(&name, "Program name", MIN_PROGRAM_NAME_LENGTH, MAX_PROGRAM_NAME_LENGTH)?;

        let description = non_blank(self.description);
        if let Some(description) = &description {
            check_length(description, "Description", 0, MAX_DESCRIPTION_LENGTH)?;
        }

        Ok(Self {
            name,
            department: self.department,
            description,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramUpdateInput {
    pub name: Option<String>,
    pub department: Option<Department>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl ProgramUpdateInput {
    pub(crate) fn validate(self) -> Result<Self, ValidationError> {
        let name = match self.name.as_deref() {
            Some(raw) => {
                let name = require_text(Some(raw), "Program name")?;
                check_length(&name, "Program name", MIN_PROGRAM_NAME_LENGTH, MAX_PROGRAM_NAME_LENGTH)?;
                Some(name)
            }
            None => None,
        };

        // Kept as Some("") when blank so storage can clear the column
        let description = self.description.map(|d| d.trim().to_string());
        if let Some(description) = &description {
            check_length(description, "Description", 0, MAX_DESCRIPTION_LENGTH)?;
        }

        Ok(Self {
            name,
            department: self.department,
            description,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProgramsQuery {
    pub department: Option<String>,
    #[serde(default)]
    pub include_inactive: Option<String>,
}

impl ListProgramsQuery {
    pub fn department(&self) -> Result<Option<Department>, ValidationError> {
        match non_blank(self.department.clone()) {
            Some(raw) => raw
                .parse::<Department>()
                .map(Some)
                .map_err(|e| ValidationError::Invalid(e.to_string())),
            None => Ok(None),
        }
    }

    /// `includeInactive=true` or `1` lists retired programs too
    pub fn include_inactive(&self) -> bool {
        matches!(
            self.include_inactive.as_deref().map(str::trim),
            Some("true") | Some("1")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_input_defaults_to_active() {
        let input: ProgramCreateInput =
            serde_json::from_str(r#"{"name":"BS Nursing","department":"college"}"#).unwrap();
        assert!(input.is_active);
        assert_eq!(input.department, Department::College);
    }

    #[test]
    fn test_create_input_validation() {
        let short = ProgramCreateInput::new("IT", Department::College);
        assert!(matches!(
            short.validate(),
            Err(ValidationError::TooShort { .. })
        ));

        let mut blank_description = ProgramCreateInput::new(" STEM ", Department::SeniorHigh);
        blank_description.description = Some("   ".to_string());
        let validated = blank_description.validate().unwrap();
        assert_eq!(validated.name, "STEM");
        assert_eq!(validated.description, None);
    }

    #[test]
    fn test_list_query_flags() {
        let query = ListProgramsQuery {
            department: Some("senior-high".to_string()),
            include_inactive: Some("true".to_string()),
        };
        assert_eq!(query.department().unwrap(), Some(Department::SeniorHigh));
        assert!(query.include_inactive());

        let bad = ListProgramsQuery {
            department: Some("graduate".to_string()),
            include_inactive: None,
        };
        assert!(bad.department().is_err());
        assert!(!bad.include_inactive());
    }
}
