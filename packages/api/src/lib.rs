// ABOUTME: HTTP API layer for the thesis archive providing REST endpoints and routing
// ABOUTME: Integration layer that depends on all domain packages

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::path::Path;
use tower_http::services::ServeDir;

pub mod account_handlers;
pub mod auth;
pub mod error;
pub mod health;
pub mod pdf_store;
pub mod programs_handlers;
pub mod settings_handlers;
pub mod state;
pub mod thesis_handlers;
pub mod upload;
pub mod users_handlers;

pub use error::{ApiError, ApiResult};
pub use pdf_store::{LocalPdfStore, PdfStore, PdfStoreError, UPLOADS_ROUTE};
pub use state::AppState;

/// Creates the thesis API router
pub fn create_thesis_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(thesis_handlers::list_theses).post(thesis_handlers::create_thesis),
        )
        .route("/years/unique", get(thesis_handlers::unique_years))
        .route("/my-submissions", get(thesis_handlers::my_submissions))
        .route("/submit", post(thesis_handlers::submit_thesis))
        .route(
            "/{id}",
            get(thesis_handlers::get_thesis)
                .put(thesis_handlers::update_thesis)
                .delete(thesis_handlers::delete_thesis),
        )
        .route("/{id}/approve", put(thesis_handlers::approve_thesis))
        .route("/{id}/reject", put(thesis_handlers::reject_thesis))
        .layer(DefaultBodyLimit::max(upload::MULTIPART_BODY_LIMIT))
}

/// Creates the self-service account router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/username", put(account_handlers::change_username))
        .route("/password", put(account_handlers::change_password))
}

/// Creates the account management router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{kind}",
            get(users_handlers::list_users).post(users_handlers::create_user),
        )
        .route(
            "/{kind}/{id}",
            get(users_handlers::get_user)
                .put(users_handlers::update_user)
                .delete(users_handlers::delete_user),
        )
}

/// Creates the programs router
pub fn create_programs_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(programs_handlers::list_programs).post(programs_handlers::create_program),
        )
        .route(
            "/{id}",
            get(programs_handlers::get_program)
                .put(programs_handlers::update_program)
                .delete(programs_handlers::delete_program),
        )
}

/// Creates the settings router
pub fn create_settings_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(settings_handlers::get_settings).put(settings_handlers::update_settings),
    )
}

/// Full application router: JSON API under `/api`, stored PDFs under `/uploads`
pub fn create_router(state: AppState, upload_dir: &Path) -> Router {
    let api = Router::new()
        .route("/health", get(health::health_check))
        .nest("/auth", create_auth_router())
        .nest("/thesis", create_thesis_router())
        .nest("/users", create_users_router())
        .nest("/programs", create_programs_router())
        .nest("/settings", create_settings_router());

    Router::new()
        .nest("/api", api)
        .nest_service(UPLOADS_ROUTE, ServeDir::new(upload_dir))
        .with_state(state)
}
