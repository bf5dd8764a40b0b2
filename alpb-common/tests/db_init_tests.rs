//! Tests for on-disk database initialization

use alpb_common::db::init::init_database;
use tempfile::TempDir;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("tracking.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("tracking.db");

    let pool1 = init_database(&db_path).await.unwrap();
    sqlx::query("INSERT INTO ballpark (ballpark_id, ballpark_name) VALUES ('bp-1', 'ClipperMagazine')")
        .execute(&pool1)
        .await
        .unwrap();
    pool1.close().await;

    let pool2 = init_database(&db_path).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ballpark")
        .fetch_one(&pool2)
        .await
        .unwrap();

    assert_eq!(count, 1, "Reopening must keep existing rows");
}

#[tokio::test]
async fn test_wal_and_foreign_keys_enabled() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("tracking.db");

    let pool = init_database(&db_path).await.unwrap();

    let journal_mode: String = sqlx::query_scalar("PRAGMA journal_mode")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(journal_mode.to_lowercase(), "wal");

    let foreign_keys: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(foreign_keys, 1);
}

#[tokio::test]
async fn test_game_rejects_unknown_team() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("tracking.db");

    let pool = init_database(&db_path).await.unwrap();

    let result = sqlx::query(
        r#"
        INSERT INTO game (game_id, home_team_id, visiting_team_id, ballpark_id, date, daily_game_number)
        VALUES ('g-1', 'missing', 'missing', 'missing', '2024-06-29', 1)
        "#,
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "Foreign keys must be enforced");
}
