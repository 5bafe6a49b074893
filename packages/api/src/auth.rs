// ABOUTME: Authentication context for API requests
// ABOUTME: Bearer token extractors that resolve the acting user and enforce roles

use archive_core::Role;
use archive_security::SecurityError;
use archive_storage::StorageError;
use archive_theses::Actor;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Any authenticated user
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Actor);

impl CurrentUser {
    pub fn actor(&self) -> &Actor {
        &self.0
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| ApiError::unauthorized("Access token required"))?;

        let claims = state.tokens.verify(token).map_err(|e| {
            warn!("Rejected bearer token on {}: {}", parts.uri.path(), e);
            ApiError::unauthorized("Invalid or expired token")
        })?;

        // The account may have been deleted or changed role since the token was signed
        let user = match state.users.get_user(&claims.sub).await {
            Ok(user) => user,
            Err(SecurityError::Storage(StorageError::NotFound)) => {
                warn!("Token on {} names unknown user {}", parts.uri.path(), claims.sub);
                return Err(ApiError::unauthorized("Invalid or expired token"));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self(Actor::new(user.id, user.role)))
    }
}

/// Admin or student assistant
#[derive(Debug, Clone)]
pub struct StaffUser(pub Actor);

impl FromRequestParts<AppState> for StaffUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser(actor) = CurrentUser::from_request_parts(parts, state).await?;
        if !actor.is_staff() {
            warn!("User {} ({}) denied staff route {}", actor.id, actor.role, parts.uri.path());
            return Err(ApiError::forbidden("Insufficient permissions"));
        }
        Ok(Self(actor))
    }
}

/// Administrator only
#[derive(Debug, Clone)]
pub struct AdminUser(pub Actor);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser(actor) = CurrentUser::from_request_parts(parts, state).await?;
        if actor.role != Role::Admin {
            warn!("User {} ({}) denied admin route {}", actor.id, actor.role, parts.uri.path());
            return Err(ApiError::forbidden("Admin access required"));
        }
        Ok(Self(actor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/thesis");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&parts_with(Some("Bearer abc.def"))), Some("abc.def"));
        assert_eq!(bearer_token(&parts_with(Some("bearer   abc "))), Some("abc"));
        assert_eq!(bearer_token(&parts_with(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts_with(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts_with(None)), None);
    }
}
