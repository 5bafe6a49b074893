// ABOUTME: Shared harness for API integration tests
// ABOUTME: Router over an in-memory database, seeded accounts, and request helpers

#![allow(dead_code)]

use archive_api::{create_router, AppState, LocalPdfStore};
use archive_core::Role;
use archive_security::{TokenService, UserCreateInput};
use archive_storage::test_utils::memory_pool;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "archive-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub upload_dir: TempDir,
    pub admin_token: String,
    pub assistant_token: String,
    pub student_token: String,
    pub other_student_token: String,
    pub student_id: String,
}

pub async fn setup() -> TestApp {
    let pool = memory_pool().await;
    let upload_dir = TempDir::new().expect("temp dir");
    let store = LocalPdfStore::new(upload_dir.path());
    let tokens = TokenService::new("integration-test-secret-value", 1);
    let state = AppState::new(pool, tokens, Arc::new(store));

    let admin_token = seed_account(&state, Role::Admin, "admin").await.1;
    let assistant_token = seed_account(&state, Role::StudentAssistant, "assistant").await.1;
    let (student_id, student_token) = seed_account(&state, Role::Student, "student").await;
    let other_student_token = seed_account(&state, Role::Student, "other").await.1;

    TestApp {
        router: create_router(state.clone(), upload_dir.path()),
        state,
        upload_dir,
        admin_token,
        assistant_token,
        student_token,
        other_student_token,
        student_id,
    }
}

async fn seed_account(state: &AppState, role: Role, username: &str) -> (String, String) {
    let user = state
        .users
        .create_user(
            role,
            UserCreateInput {
                username: Some(username.to_string()),
                first_name: Some("Test".to_string()),
                last_name: Some("Account".to_string()),
                password: Some("password123".to_string()),
            },
        )
        .await
        .expect("seed account");
    let token = state.tokens.issue(&user.id, role).expect("issue token");
    (user.id, token)
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request(Method::GET, uri, token).body(Body::empty()).unwrap())
            .await
    }

    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.send(
            request(method, uri, token)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn multipart(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        fields: &[(&str, &str)],
        file: Option<(&str, &[u8])>,
    ) -> (StatusCode, Value) {
        self.send(
            request(method, uri, token)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(multipart_body(fields, file)))
                .unwrap(),
        )
        .await
    }

    pub async fn empty(&self, method: Method, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request(method, uri, token).body(Body::empty()).unwrap())
            .await
    }
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
}

/// Build a multipart body; `file` is `(content type, bytes)` for the `pdf` part
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"pdf\"; filename=\"thesis.pdf\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}
