// ABOUTME: End-to-end tests for self-service account routes and token resolution
// ABOUTME: Covers username and password changes plus tokens for deleted or re-roled users

mod common;

use archive_core::Role;
use axum::http::{Method, StatusCode};
use common::setup;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_any_role_can_change_username() {
    let app = setup().await;

    for (token, name) in [
        (&app.admin_token, "head-librarian"),
        (&app.assistant_token, "desk-assistant"),
        (&app.student_token, "thesis-writer"),
    ] {
        let (status, body) = app
            .json(Method::PUT, "/api/auth/username", Some(token), json!({ "username": name }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["username"], name);
        assert!(body["user"].get("passwordHash").is_none());
    }

    let renamed = app
        .state
        .users
        .verify_credentials("thesis-writer", "password123")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.id, app.student_id);
}

#[tokio::test]
async fn test_username_change_conflicts_and_validates() {
    let app = setup().await;

    let (status, body) = app
        .json(
            Method::PUT,
            "/api/auth/username",
            Some(&app.student_token),
            json!({ "username": "other" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
    assert_eq!(body["success"], false);

    let (status, body) = app
        .json(Method::PUT, "/api/auth/username", Some(&app.student_token), json!({ "username": "  " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Username is required");

    let (status, _) = app
        .json(Method::PUT, "/api/auth/username", None, json!({ "username": "nobody-here" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_password_change_checks_current_password() {
    let app = setup().await;

    let (status, body) = app
        .json(
            Method::PUT,
            "/api/auth/password",
            Some(&app.assistant_token),
            json!({ "currentPassword": "not-my-password", "newPassword": "fresh-secret" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Current password is incorrect");

    let (status, body) = app
        .json(
            Method::PUT,
            "/api/auth/password",
            Some(&app.assistant_token),
            json!({ "currentPassword": "password123", "newPassword": "short" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = app
        .json(
            Method::PUT,
            "/api/auth/password",
            Some(&app.assistant_token),
            json!({ "currentPassword": "password123", "newPassword": "fresh-secret" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password updated successfully");

    let users = &app.state.users;
    assert!(users.verify_credentials("assistant", "password123").await.unwrap().is_none());
    assert!(users.verify_credentials("assistant", "fresh-secret").await.unwrap().is_some());
}

#[tokio::test]
async fn test_token_of_deleted_user_is_unauthorized() {
    let app = setup().await;

    let (status, _) = app
        .empty(
            Method::DELETE,
            &format!("/api/users/students/{}", app.student_id),
            Some(&app.admin_token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .multipart(
            Method::POST,
            "/api/thesis/submit",
            Some(&app.student_token),
            &[("title", "Orphaned Submission"), ("department", "college")],
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["success"], false);

    let (status, _) = app.get("/api/thesis/my-submissions", Some(&app.student_token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_stored_role_outranks_token_claim() {
    let app = setup().await;
    let forged_role = app.state.tokens.issue(&app.student_id, Role::Admin).unwrap();

    let (status, body) = app.get("/api/users/students", Some(&forged_role)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}
