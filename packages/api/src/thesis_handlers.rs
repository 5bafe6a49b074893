// ABOUTME: HTTP request handlers for thesis operations
// ABOUTME: Listing, lookup, staff creation, student submission, review, and removal

use archive_core::pagination::deserialize_lenient_i64;
use archive_core::{Page, PaginationParams};
use archive_theses::access::ensure_can_modify;
use archive_theses::{ListThesesQuery, Thesis, ThesisError, YearsQuery};
use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::QueryRejection,
        Multipart, Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::auth::{CurrentUser, StaffUser};
use crate::error::ApiResult;
use crate::state::AppState;
use crate::upload::ThesisUpload;

/// Paginated listing with optional filters
pub async fn list_theses(
    State(state): State<AppState>,
    query: Result<Query<ListThesesQuery>, QueryRejection>,
) -> ApiResult<Json<Page<Thesis>>> {
    let Query(query) = query?;
    let filter = query.filter()?;
    let params = query.pagination();
    info!(
        "Listing theses (page: {}, limit: {}, filter: {:?})",
        params.page(),
        params.limit(),
        filter
    );

    let page = state.theses.list(&filter, &params).await?;
    Ok(Json(page))
}

pub async fn get_thesis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Thesis>> {
    info!("Getting thesis: {}", id);
    Ok(Json(state.theses.get(&id).await?))
}

/// Distinct publication years, newest first
pub async fn unique_years(
    State(state): State<AppState>,
    query: Result<Query<YearsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<i32>>> {
    let Query(query) = query?;
    let department = query.department()?;
    Ok(Json(state.theses.unique_years(department).await?))
}

/// Staff create: inserted directly as approved
pub async fn create_thesis(
    State(state): State<AppState>,
    StaffUser(actor): StaffUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<Thesis>)> {
    info!("Creating thesis as {} {}", actor.role, actor.id);

    let upload = ThesisUpload::from_multipart(multipart?).await?;
    let mut thesis = upload.form.clone().into_new_thesis()?;
    thesis.pdf_url = upload.store_pdf(state.pdf_store.as_ref()).await?;

    let created = state.theses.create(&actor, thesis).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Submission by any authenticated user, pending review
pub async fn submit_thesis(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<Thesis>)> {
    info!("Thesis submission from {}", actor.id);

    let upload = ThesisUpload::from_multipart(multipart?).await?;
    let mut thesis = upload.form.clone().into_new_thesis()?;
    thesis.pdf_url = upload.store_pdf(state.pdf_store.as_ref()).await?;

    let submitted = state.theses.submit(&actor, thesis).await?;
    Ok((StatusCode::CREATED, Json(submitted)))
}

/// Partial update by the owner (while pending) or by staff
pub async fn update_thesis(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<Thesis>> {
    info!("Updating thesis {} as {}", id, actor.id);

    let upload = ThesisUpload::from_multipart(multipart?).await?;
    let mut update = upload.form.clone().into_update()?;

    // Check before writing a new file so a refused request leaves nothing behind
    let existing = state.theses.get(&id).await?;
    ensure_can_modify(&actor, &existing, "edit")?;
    if update.is_empty() && upload.pdf.is_none() {
        return Err(ThesisError::NothingToUpdate.into());
    }

    update.pdf_url = upload.store_pdf(state.pdf_store.as_ref()).await?;
    let replaced_pdf = update.pdf_url.is_some();

    let (before, updated) = state.theses.update(&actor, &id, update).await?;

    if replaced_pdf {
        if let Some(old_url) = before.pdf_url.as_deref() {
            release_pdf(&state, old_url).await;
        }
    }

    Ok(Json(updated))
}

pub async fn approve_thesis(
    State(state): State<AppState>,
    StaffUser(actor): StaffUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Thesis>> {
    info!("Approving thesis {} by {}", id, actor.id);
    Ok(Json(state.theses.approve(&actor, &id).await?))
}

pub async fn reject_thesis(
    State(state): State<AppState>,
    StaffUser(actor): StaffUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Thesis>> {
    info!("Rejecting thesis {} by {}", id, actor.id);
    Ok(Json(state.theses.reject(&actor, &id).await?))
}

pub async fn delete_thesis(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    info!("Deleting thesis {} as {}", id, actor.id);

    let deleted = state.theses.delete(&actor, &id).await?;
    if let Some(url) = deleted.pdf_url.as_deref() {
        release_pdf(&state, url).await;
    }

    Ok(Json(json!({ "message": "Thesis deleted successfully" })))
}

/// Page and limit only; unparsable values fall back to defaults
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub limit: Option<i64>,
}

/// The caller's own submissions, newest first
pub async fn my_submissions(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> ApiResult<Json<Page<Thesis>>> {
    let Query(query) = query?;
    let params = PaginationParams::from_query(query.page, query.limit);
    info!("Listing submissions of {}", actor.id);
    Ok(Json(state.theses.my_submissions(&actor, &params).await?))
}

/// Best-effort PDF removal; the record change already happened
async fn release_pdf(state: &AppState, url: &str) {
    if let Err(e) = state.pdf_store.remove(url).await {
        warn!("Failed to remove stored PDF {}: {}", url, e);
    }
}
