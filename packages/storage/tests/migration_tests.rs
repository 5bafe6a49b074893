// ABOUTME: Integration tests for database setup and schema migrations
// ABOUTME: Verifies tables, the seeded settings row, and schema constraints

use archive_storage::{connect, DatabaseConfig};
use sqlx::Row;
use tempfile::TempDir;

async fn open_temp_db() -> (sqlx::SqlitePool, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = DatabaseConfig::new(dir.path().join("nested").join("archive.db"));
    let pool = connect(&config).await.unwrap();
    (pool, dir)
}

#[tokio::test]
async fn test_connect_creates_database_and_tables() {
    let (pool, dir) = open_temp_db().await;

    assert!(dir.path().join("nested").join("archive.db").exists());

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' AND name NOT LIKE 'sqlite%' ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(tables, vec!["programs", "system_settings", "theses", "users"]);
}

#[tokio::test]
async fn test_settings_row_is_seeded_once() {
    let (pool, dir) = open_temp_db().await;

    // Reconnecting re-runs the migrator, which must be a no-op
    drop(pool);
    let config = DatabaseConfig::new(dir.path().join("nested").join("archive.db"));
    let pool = connect(&config).await.unwrap();

    let row = sqlx::query("SELECT COUNT(*) AS count, MAX(school_name) AS name FROM system_settings")
        .fetch_one(&pool)
        .await
        .unwrap();

    let count: i64 = row.try_get("count").unwrap();
    let name: String = row.try_get("name").unwrap();
    assert_eq!(count, 1);
    assert_eq!(name, "Tayabas Western Academy");
}

#[tokio::test]
async fn test_thesis_department_is_constrained() {
    let (pool, _dir) = open_temp_db().await;

    let result = sqlx::query(
        "INSERT INTO theses (id, title, department, created_at, updated_at) VALUES ('t1', 'X', 'graduate', 'now', 'now')",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_second_settings_row_is_rejected() {
    let (pool, _dir) = open_temp_db().await;

    let result = sqlx::query(
        "INSERT INTO system_settings (id, school_name, about_content, updated_at) VALUES (2, 'Other', 'About', 'now')",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err());
}
