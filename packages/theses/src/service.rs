// ABOUTME: Thesis operations as seen by an authenticated actor
// ABOUTME: Combines storage with the ownership gate and approval workflow

use archive_core::{Department, Page, PaginationParams, ThesisStatus, DEFAULT_SHELF_LOCATION};
use sqlx::SqlitePool;
use tracing::info;

use crate::access::{ensure_can_modify, ensure_staff};
use crate::storage::ThesisStorage;
use crate::types::{Actor, NewThesis, Thesis, ThesisFilter, ThesisUpdate};
use crate::workflow::{plan_transition, Decision, Transition};
use crate::ThesisError;

#[derive(Clone)]
pub struct ThesisService {
    storage: ThesisStorage,
}

impl ThesisService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            storage: ThesisStorage::new(pool),
        }
    }

    pub async fn list(
        &self,
        filter: &ThesisFilter,
        params: &PaginationParams,
    ) -> Result<Page<Thesis>, ThesisError> {
        self.storage.list(filter, params).await
    }

    pub async fn get(&self, id: &str) -> Result<Thesis, ThesisError> {
        self.storage.get(id).await
    }

    pub async fn unique_years(&self, department: Option<Department>) -> Result<Vec<i32>, ThesisError> {
        self.storage.unique_years(department).await
    }

    /// Staff entry point: the record goes straight into the catalogue and
    /// belongs to no submitter
    pub async fn create(&self, actor: &Actor, thesis: NewThesis) -> Result<Thesis, ThesisError> {
        ensure_staff(actor)?;

        let created = self
            .storage
            .insert(thesis, ThesisStatus::Approved, None)
            .await?;

        info!("Thesis {} created by {} {}", created.id, actor.role, actor.id);
        Ok(created)
    }

    /// Submission for review; the actor becomes the owner of the record
    pub async fn submit(&self, actor: &Actor, mut thesis: NewThesis) -> Result<Thesis, ThesisError> {
        if thesis.shelf_location.is_none() {
            thesis.shelf_location = Some(DEFAULT_SHELF_LOCATION.to_string());
        }

        let submitted = self
            .storage
            .insert(thesis, ThesisStatus::Pending, Some(&actor.id))
            .await?;

        info!("Thesis {} submitted by {}", submitted.id, actor.id);
        Ok(submitted)
    }

    /// Returns the record as it was before the update together with the new one
    pub async fn update(
        &self,
        actor: &Actor,
        id: &str,
        update: ThesisUpdate,
    ) -> Result<(Thesis, Thesis), ThesisError> {
        let existing = self.storage.get(id).await?;
        ensure_can_modify(actor, &existing, "edit")?;

        if update.is_empty() {
            return Err(ThesisError::NothingToUpdate);
        }

        let updated = self.storage.update(id, &update).await?;
        info!("Thesis {} updated by {}", id, actor.id);
        Ok((existing, updated))
    }

    pub async fn approve(&self, actor: &Actor, id: &str) -> Result<Thesis, ThesisError> {
        self.decide(actor, id, Decision::Approve).await
    }

    pub async fn reject(&self, actor: &Actor, id: &str) -> Result<Thesis, ThesisError> {
        self.decide(actor, id, Decision::Reject).await
    }

    pub async fn decide(&self, actor: &Actor, id: &str, decision: Decision) -> Result<Thesis, ThesisError> {
        ensure_staff(actor)?;

        let current = self.storage.get(id).await?;
        let target = match plan_transition(current.status, decision)? {
            Transition::Unchanged => return Ok(current),
            Transition::Apply(target) => target,
        };

        if !self.storage.set_status_if_pending(id, target).await? {
            // Someone else decided first; re-plan against what is stored now
            let latest = self.storage.get(id).await?;
            return match plan_transition(latest.status, decision)? {
                Transition::Unchanged => Ok(latest),
                Transition::Apply(_) => Err(ThesisError::InvalidTransition {
                    from: latest.status,
                    action: decision.verb(),
                }),
            };
        }

        info!("Thesis {} {} by {}", id, target, actor.id);
        self.storage.get(id).await
    }

    /// Remove a record, returning it so the caller can release its PDF
    pub async fn delete(&self, actor: &Actor, id: &str) -> Result<Thesis, ThesisError> {
        let existing = self.storage.get(id).await?;
        ensure_can_modify(actor, &existing, "delete")?;

        self.storage.delete(id).await?;
        info!("Thesis {} deleted by {}", id, actor.id);
        Ok(existing)
    }

    pub async fn my_submissions(
        &self,
        actor: &Actor,
        params: &PaginationParams,
    ) -> Result<Page<Thesis>, ThesisError> {
        self.storage.list_by_submitter(&actor.id, params).await
    }
}
