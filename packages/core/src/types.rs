// ABOUTME: Shared enumerations for departments, roles, and thesis status
// ABOUTME: String forms match the JSON and database spellings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind}: '{value}'. Must be one of: {allowed}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub allowed: &'static str,
}

/// Top-level academic division a thesis or program belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Department {
    College,
    SeniorHigh,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::College => "college",
            Department::SeniorHigh => "senior-high",
        }
    }
}

impl FromStr for Department {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "college" => Ok(Department::College),
            "senior-high" => Ok(Department::SeniorHigh),
            other => Err(ParseEnumError {
                kind: "department",
                value: other.to_string(),
                allowed: "college, senior-high",
            }),
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account role carried by every authenticated actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    StudentAssistant,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::StudentAssistant => "student-assistant",
            Role::Student => "student",
        }
    }

    /// Admins and student assistants manage the archive
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::StudentAssistant)
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Role::Admin),
            "student-assistant" => Ok(Role::StudentAssistant),
            "student" => Ok(Role::Student),
            other => Err(ParseEnumError {
                kind: "role",
                value: other.to_string(),
                allowed: "admin, student-assistant, student",
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of a thesis record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThesisStatus {
    Pending,
    Approved,
    Rejected,
}

impl ThesisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThesisStatus::Pending => "pending",
            ThesisStatus::Approved => "approved",
            ThesisStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ThesisStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(ThesisStatus::Pending),
            "approved" => Ok(ThesisStatus::Approved),
            "rejected" => Ok(ThesisStatus::Rejected),
            other => Err(ParseEnumError {
                kind: "status",
                value: other.to_string(),
                allowed: "pending, approved, rejected",
            }),
        }
    }
}

impl fmt::Display for ThesisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_round_trips_through_str() {
        assert_eq!("senior-high".parse::<Department>(), Ok(Department::SeniorHigh));
        assert_eq!(Department::College.to_string(), "college");
        assert!("graduate".parse::<Department>().is_err());
    }

    #[test]
    fn test_department_serde_spelling() {
        let json = serde_json::to_string(&Department::SeniorHigh).unwrap();
        assert_eq!(json, "\"senior-high\"");
    }

    #[test]
    fn test_role_staff() {
        assert!(Role::Admin.is_staff());
        assert!(Role::StudentAssistant.is_staff());
        assert!(!Role::Student.is_staff());
        assert_eq!(
            serde_json::to_string(&Role::StudentAssistant).unwrap(),
            "\"student-assistant\""
        );
    }

    #[test]
    fn test_status_parse_error_message() {
        let err = "archived".parse::<ThesisStatus>().unwrap_err();
        assert_eq!(err.kind, "status");
        assert!(err.to_string().contains("archived"));
    }
}
