// ABOUTME: HTTP request handlers for system settings
// ABOUTME: Public read of institution branding, admin-only partial update

use archive_settings::{SettingsUpdate, SystemSettings};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn get_settings(State(state): State<AppState>) -> ApiResult<Json<SystemSettings>> {
    Ok(Json(state.settings.get().await?))
}

pub async fn update_settings(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    body: Result<Json<SettingsUpdate>, JsonRejection>,
) -> ApiResult<Json<SystemSettings>> {
    let Json(update) = body?;
    if update.is_empty() {
        return Err(ApiError::validation("No fields to update"));
    }

    info!("Admin {} updating system settings", admin.id);
    Ok(Json(state.settings.update(update).await?))
}
