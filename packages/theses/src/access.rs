// ABOUTME: Authorization rules for thesis mutations
// ABOUTME: Staff act on any record; students only on their own pending submissions

use archive_core::ThesisStatus;
use tracing::warn;

use crate::types::{Actor, Thesis};
use crate::ThesisError;

pub fn ensure_staff(actor: &Actor) -> Result<(), ThesisError> {
    if actor.is_staff() {
        Ok(())
    } else {
        warn!("User {} ({}) attempted a staff-only thesis action", actor.id, actor.role);
        Err(ThesisError::Forbidden("Insufficient permissions".to_string()))
    }
}

/// Check that `actor` may `action` ("edit", "delete") the given record
pub fn ensure_can_modify(actor: &Actor, thesis: &Thesis, action: &str) -> Result<(), ThesisError> {
    if actor.is_staff() {
        return Ok(());
    }

    if thesis.submitted_by.as_deref() != Some(actor.id.as_str()) {
        warn!("User {} denied {} on thesis {}: not the submitter", actor.id, action, thesis.id);
        return Err(ThesisError::Forbidden(format!(
            "You can only {} your own submissions",
            action
        )));
    }

    if thesis.status != ThesisStatus::Pending {
        warn!("User {} denied {} on thesis {}: status is {}", actor.id, action, thesis.id, thesis.status);
        return Err(ThesisError::Forbidden(format!(
            "You can only {} pending submissions",
            action
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use archive_core::{Department, Role};
    use chrono::Utc;
    use rstest::rstest;

    fn thesis(submitted_by: Option<&str>, status: ThesisStatus) -> Thesis {
        Thesis {
            id: "thesis-1".to_string(),
            title: "A Study".to_string(),
            abstract_text: None,
            authors: vec![],
            advisors: vec![],
            department: Department::College,
            program: None,
            year: None,
            pdf_url: None,
            shelf_location: None,
            status,
            submitted_by: submitted_by.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(Some("student-1"), ThesisStatus::Pending, true)]
    #[case(Some("student-1"), ThesisStatus::Approved, false)]
    #[case(Some("student-1"), ThesisStatus::Rejected, false)]
    #[case(Some("student-2"), ThesisStatus::Pending, false)]
    #[case(None, ThesisStatus::Pending, false)]
    fn test_student_ownership_gate(
        #[case] submitted_by: Option<&str>,
        #[case] status: ThesisStatus,
        #[case] allowed: bool,
    ) {
        let actor = Actor::new("student-1", Role::Student);
        let result = ensure_can_modify(&actor, &thesis(submitted_by, status), "edit");
        assert_eq!(result.is_ok(), allowed);
        if !allowed {
            assert!(matches!(result, Err(ThesisError::Forbidden(_))));
        }
    }

    #[rstest]
    #[case(Role::Admin)]
    #[case(Role::StudentAssistant)]
    fn test_staff_bypass_ownership(#[case] role: Role) {
        let actor = Actor::new("staff-1", role);
        assert!(ensure_can_modify(&actor, &thesis(Some("someone-else"), ThesisStatus::Approved), "delete").is_ok());
        assert!(ensure_staff(&actor).is_ok());
    }

    #[test]
    fn test_students_are_not_staff() {
        let actor = Actor::new("student-1", Role::Student);
        assert!(matches!(ensure_staff(&actor), Err(ThesisError::Forbidden(_))));
    }
}
