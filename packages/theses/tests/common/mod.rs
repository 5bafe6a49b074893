// ABOUTME: Shared helpers for thesis integration tests
// ABOUTME: Migrated in-memory database plus seeded accounts

#![allow(dead_code)]

use archive_core::{Department, Role};
use archive_storage::test_utils::memory_pool;
use archive_theses::{Actor, NewThesis, ThesisService};
use chrono::Utc;
use sqlx::SqlitePool;

pub struct TestContext {
    pub pool: SqlitePool,
    pub service: ThesisService,
    pub admin: Actor,
    pub assistant: Actor,
    pub student: Actor,
    pub other_student: Actor,
}

pub async fn setup() -> TestContext {
    let pool = memory_pool().await;
    let admin = seed_user(&pool, "user-admin", "admin", Role::Admin).await;
    let assistant = seed_user(&pool, "user-assistant", "assistant", Role::StudentAssistant).await;
    let student = seed_user(&pool, "user-student", "student", Role::Student).await;
    let other_student = seed_user(&pool, "user-other", "other", Role::Student).await;

    TestContext {
        service: ThesisService::new(pool.clone()),
        pool,
        admin,
        assistant,
        student,
        other_student,
    }
}

/// Insert an account row directly; the theses table references users by id
pub async fn seed_user(pool: &SqlitePool, id: &str, username: &str, role: Role) -> Actor {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO users (id, username, password_hash, first_name, last_name, role, created_at, updated_at) \
         VALUES (?, ?, 'unused', 'Test', 'User', ?, ?, ?)",
    )
    .bind(id)
    .bind(username)
    .bind(role.as_str())
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .expect("Failed to seed user");

    Actor::new(id, role)
}

pub fn thesis(title: &str, department: Department, year: Option<i32>) -> NewThesis {
    let mut thesis = NewThesis::new(title, department);
    thesis.year = year;
    thesis
}
