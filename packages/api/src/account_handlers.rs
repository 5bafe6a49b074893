// ABOUTME: HTTP request handlers for the signed-in user's own account
// ABOUTME: Username and password changes available to every role

use archive_security::User;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UsernameChange {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub user: User,
}

pub async fn change_username(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Result<Json<UsernameChange>, JsonRejection>,
) -> ApiResult<Json<AccountResponse>> {
    let Json(change) = body?;
    info!("User {} changing username", user.actor().id);

    let user = state
        .users
        .change_username(&user.actor().id, &change.username)
        .await?;
    Ok(Json(AccountResponse { user }))
}

pub async fn change_password(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Result<Json<PasswordChange>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(change) = body?;
    info!("User {} changing password", user.actor().id);

    state
        .users
        .change_password(&user.actor().id, &change.current_password, &change.new_password)
        .await?;
    Ok(Json(json!({ "message": "Password updated successfully" })))
}
