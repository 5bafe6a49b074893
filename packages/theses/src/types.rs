// ABOUTME: Thesis type definitions
// ABOUTME: Records, form inputs, listing filters, and the acting user

use archive_core::pagination::deserialize_lenient_i64;
use archive_core::validation::{check_length, non_blank, parse_year, require_text};
use archive_core::{Department, PaginationParams, Role, ThesisStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ThesisError;

pub const MAX_TITLE_LENGTH: usize = 500;

/// An author or advisor attached to a thesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thesis {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub authors: Vec<Person>,
    pub advisors: Vec<Person>,
    pub department: Department,
    pub program: Option<String>,
    pub year: Option<i32>,
    pub pdf_url: Option<String>,
    pub shelf_location: Option<String>,
    pub status: ThesisStatus,
    pub submitted_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The authenticated user performing an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}

/// Validated fields for a thesis about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewThesis {
    pub title: String,
    pub abstract_text: Option<String>,
    pub authors: Vec<Person>,
    pub advisors: Vec<Person>,
    pub department: Department,
    pub program: Option<String>,
    pub year: Option<i32>,
    pub shelf_location: Option<String>,
    pub pdf_url: Option<String>,
}

impl NewThesis {
    pub fn new(title: impl Into<String>, department: Department) -> Self {
        Self {
            title: title.into(),
            abstract_text: None,
            authors: Vec::new(),
            advisors: Vec::new(),
            department,
            program: None,
            year: None,
            shelf_location: None,
            pdf_url: None,
        }
    }
}

/// Partial update. The outer `Option` is "field supplied", the inner one
/// distinguishes a cleared value from a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThesisUpdate {
    pub title: Option<String>,
    pub abstract_text: Option<Option<String>>,
    pub authors: Option<Vec<Person>>,
    pub advisors: Option<Vec<Person>>,
    pub department: Option<Department>,
    pub program: Option<Option<String>>,
    pub year: Option<Option<i32>>,
    pub shelf_location: Option<Option<String>>,
    pub pdf_url: Option<String>,
}

impl ThesisUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.abstract_text.is_none()
            && self.authors.is_none()
            && self.advisors.is_none()
            && self.department.is_none()
            && self.program.is_none()
            && self.year.is_none()
            && self.shelf_location.is_none()
            && self.pdf_url.is_none()
    }
}

/// Raw text fields of a thesis form, as posted in a multipart body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThesisForm {
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub authors: Option<String>,
    pub advisors: Option<String>,
    pub department: Option<String>,
    pub program: Option<String>,
    pub year: Option<String>,
    pub shelf_location: Option<String>,
}

impl ThesisForm {
    /// Record a named text field. Returns false for names the form does not know.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "title" => &mut self.title,
            "abstract" => &mut self.abstract_text,
            "authors" => &mut self.authors,
            "advisors" => &mut self.advisors,
            "department" => &mut self.department,
            "program" => &mut self.program,
            "year" => &mut self.year,
            "shelfLocation" => &mut self.shelf_location,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    pub fn into_new_thesis(self) -> Result<NewThesis, ThesisError> {
        let title = require_text(self.title.as_deref(), "Title")?;
        check_length(&title, "Title", 1, MAX_TITLE_LENGTH)?;

        let department = require_text(self.department.as_deref(), "Department")?
            .parse::<Department>()?;

        let year = match self.year.as_deref() {
            Some(raw) => parse_year(raw)?,
            None => None,
        };

        Ok(NewThesis {
            title,
            abstract_text: non_blank(self.abstract_text),
            authors: parse_optional_people("authors", self.authors.as_deref())?,
            advisors: parse_optional_people("advisors", self.advisors.as_deref())?,
            department,
            program: non_blank(self.program),
            year,
            shelf_location: non_blank(self.shelf_location),
            pdf_url: None,
        })
    }

    pub fn into_update(self) -> Result<ThesisUpdate, ThesisError> {
        let title = match self.title.as_deref() {
            Some(raw) => {
                let title = require_text(Some(raw), "Title")?;
                check_length(&title, "Title", 1, MAX_TITLE_LENGTH)?;
                Some(title)
            }
            None => None,
        };

        let department = match self.department.as_deref() {
            Some(raw) => Some(require_text(Some(raw), "Department")?.parse::<Department>()?),
            None => None,
        };

        let year = match self.year.as_deref() {
            Some(raw) => Some(parse_year(raw)?),
            None => None,
        };

        let authors = match self.authors.as_deref() {
            Some(raw) => Some(parse_people("authors", raw)?),
            None => None,
        };
        let advisors = match self.advisors.as_deref() {
            Some(raw) => Some(parse_people("advisors", raw)?),
            None => None,
        };

        Ok(ThesisUpdate {
            title,
            abstract_text: self.abstract_text.map(|v| non_blank(Some(v))),
            authors,
            advisors,
            department,
            program: self.program.map(|v| non_blank(Some(v))),
            year,
            shelf_location: self.shelf_location.map(|v| non_blank(Some(v))),
            pdf_url: None,
        })
    }
}

/// Parse a JSON-encoded list of people. Blank input is an empty list and
/// entries without a name are dropped.
pub fn parse_people(field: &str, raw: &str) -> Result<Vec<Person>, ThesisError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }

    let people: Vec<Person> = serde_json::from_str(trimmed)
        .map_err(|e| ThesisError::InvalidInput(format!("Invalid {} format: {}", field, e)))?;

    Ok(people
        .into_iter()
        .map(|p| Person {
            id: p.id.trim().to_string(),
            name: p.name.trim().to_string(),
        })
        .filter(|p| !p.name.is_empty())
        .collect())
}

fn parse_optional_people(field: &str, raw: Option<&str>) -> Result<Vec<Person>, ThesisError> {
    match raw {
        Some(raw) => parse_people(field, raw),
        None => Ok(Vec::new()),
    }
}

/// Validated listing filters; `None` means "no constraint"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThesisFilter {
    pub department: Option<Department>,
    pub program: Option<String>,
    pub year: Option<i32>,
    pub search: Option<String>,
    pub status: Option<ThesisStatus>,
}

/// Query string of the thesis listing endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListThesesQuery {
    pub department: Option<String>,
    pub program: Option<String>,
    pub year: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub limit: Option<i64>,
}

impl ListThesesQuery {
    pub fn filter(&self) -> Result<ThesisFilter, ThesisError> {
        let department = match non_blank(self.department.clone()) {
            Some(raw) => Some(raw.parse::<Department>()?),
            None => None,
        };
        let status = match non_blank(self.status.clone()) {
            Some(raw) => Some(raw.parse::<ThesisStatus>()?),
            None => None,
        };
        let year = match non_blank(self.year.clone()) {
            Some(raw) => Some(raw.parse::<i32>().map_err(|_| {
                ThesisError::InvalidInput(format!("Invalid year filter: '{}'", raw))
            })?),
            None => None,
        };

        Ok(ThesisFilter {
            department,
            program: non_blank(self.program.clone()),
            year,
            search: non_blank(self.search.clone()),
            status,
        })
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::from_query(self.page, self.limit)
    }
}

/// Query string of the year aggregation endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YearsQuery {
    pub department: Option<String>,
}

impl YearsQuery {
    pub fn department(&self) -> Result<Option<Department>, ThesisError> {
        match non_blank(self.department.clone()) {
            Some(raw) => Ok(Some(raw.parse::<Department>()?)),
            None => Ok(None),
        }
    }
}
