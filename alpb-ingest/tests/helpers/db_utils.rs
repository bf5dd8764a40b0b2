//! Database Test Utilities

use alpb_common::db::models::BallparkId;
use alpb_ingest::db::{teams, SqliteStore};
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;

/// Column information from PRAGMA table_info
#[derive(Debug, sqlx::FromRow)]
pub struct ColumnInfo {
    pub cid: i32,
    pub name: String,
    pub r#type: String,
    pub notnull: i32,
    pub dflt_value: Option<String>,
    pub pk: i32,
}

/// File-backed store in a temporary directory
///
/// Returns (TempDir, store) - TempDir must be kept alive for duration of test
pub async fn create_test_store() -> (TempDir, Arc<SqliteStore>) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("tracking.db");
    let store = SqliteStore::open(&db_path).await.unwrap();
    (temp_dir, Arc::new(store))
}

pub async fn seed_ballpark(pool: &SqlitePool, name: &str) -> BallparkId {
    teams::insert_ballpark(pool, name).await.unwrap()
}

pub async fn get_table_columns(pool: &SqlitePool, table_name: &str) -> Vec<ColumnInfo> {
    let query = format!("PRAGMA table_info({})", table_name);
    sqlx::query_as::<_, ColumnInfo>(&query)
        .fetch_all(pool)
        .await
        .unwrap()
}

pub async fn has_column(pool: &SqlitePool, table_name: &str, column_name: &str) -> bool {
    get_table_columns(pool, table_name)
        .await
        .iter()
        .any(|c| c.name == column_name)
}

pub async fn count_rows(pool: &SqlitePool, table_name: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table_name))
        .fetch_one(pool)
        .await
        .unwrap()
}
