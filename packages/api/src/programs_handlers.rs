// ABOUTME: HTTP request handlers for academic programs
// ABOUTME: Public listing and lookup, admin-only changes

use archive_programs::{ListProgramsQuery, Program, ProgramCreateInput, ProgramUpdateInput};
use archive_storage::StorageError;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

fn program_error(err: StorageError) -> ApiError {
    match err {
        StorageError::NotFound => ApiError::not_found("Program not found"),
        other => other.into(),
    }
}

/// List programs; inactive ones only when `includeInactive=true`
pub async fn list_programs(
    State(state): State<AppState>,
    query: Result<Query<ListProgramsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Program>>> {
    let Query(query) = query?;
    let department = query.department()?;
    let include_inactive = query.include_inactive();
    info!("Listing programs (department: {:?}, include_inactive: {})", department, include_inactive);

    Ok(Json(
        state
            .programs
            .list_programs(department, include_inactive)
            .await?,
    ))
}

pub async fn get_program(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Program>> {
    state
        .programs
        .get_program(&id)
        .await
        .map(Json)
        .map_err(program_error)
}

pub async fn create_program(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    body: Result<Json<ProgramCreateInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Program>)> {
    let Json(input) = body?;
    info!("Admin {} creating program {}", admin.id, input.name);

    let program = state.programs.create_program(input).await?;
    Ok((StatusCode::CREATED, Json(program)))
}

pub async fn update_program(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    body: Result<Json<ProgramUpdateInput>, JsonRejection>,
) -> ApiResult<Json<Program>> {
    let Json(input) = body?;
    info!("Admin {} updating program {}", admin.id, id);

    state
        .programs
        .update_program(&id, input)
        .await
        .map(Json)
        .map_err(program_error)
}

pub async fn delete_program(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    info!("Admin {} deleting program {}", admin.id, id);

    state
        .programs
        .delete_program(&id)
        .await
        .map_err(program_error)?;

    Ok(Json(json!({ "message": "Program deleted successfully" })))
}
