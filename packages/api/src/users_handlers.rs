// ABOUTME: HTTP request handlers for account management
// ABOUTME: Admin-only CRUD over student assistants and students, scoped by role

use archive_core::Role;
use archive_security::{User, UserCreateInput, UserUpdateInput};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Map the collection segment of `/users/{kind}` to the role it manages
fn role_for(kind: &str) -> Result<Role, ApiError> {
    match kind {
        "student-assistants" => Ok(Role::StudentAssistant),
        "students" => Ok(Role::Student),
        _ => Err(ApiError::not_found(format!("Unknown user collection '{}'", kind))),
    }
}

pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(kind): Path<String>,
) -> ApiResult<Json<Vec<User>>> {
    let role = role_for(&kind)?;
    info!("Listing {} accounts", role);
    Ok(Json(state.users.list_users(role).await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<Json<User>> {
    let role = role_for(&kind)?;
    Ok(Json(state.users.get_user_with_role(&id, role).await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(kind): Path<String>,
    body: Result<Json<UserCreateInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let role = role_for(&kind)?;
    let Json(input) = body?;
    info!("Admin {} creating {} account", admin.id, role);

    let user = state.users.create_user(role, input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path((kind, id)): Path<(String, String)>,
    body: Result<Json<UserUpdateInput>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let role = role_for(&kind)?;
    let Json(input) = body?;
    info!("Admin {} updating {} account {}", admin.id, role, id);

    Ok(Json(state.users.update_user(&id, role, input).await?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let role = role_for(&kind)?;
    info!("Admin {} deleting {} account {}", admin.id, role, id);

    state.users.delete_user(&id, role).await?;
    Ok(Json(json!({ "message": "User deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_for_collections() {
        assert_eq!(role_for("students").unwrap(), Role::Student);
        assert_eq!(role_for("student-assistants").unwrap(), Role::StudentAssistant);
        assert!(matches!(role_for("admins"), Err(ApiError::NotFound(_))));
    }
}
