//! Database initialization
//!
//! Opens (or creates) the SQLite store and brings the schema up to date.
//! Every natural key carries a UNIQUE constraint so that concurrent ingest
//! processes cannot create duplicate teams, ballparks, games, players or
//! event rows; writers rely on `ON CONFLICT` against these constraints.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Lock wait before a write gives up with SQLITE_BUSY
const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // WAL lets readers proceed while one ingest process writes
    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create every table (idempotent)
///
/// Exposed separately so tests can run it against an in-memory pool.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_team_table(pool).await?;
    create_ballpark_table(pool).await?;
    create_game_table(pool).await?;
    create_player_table(pool).await?;

    crate::db::table_schemas::sync_all_table_schemas(pool).await?;

    Ok(())
}

/// League and home ballpark are owned by a different subsystem and left unset here.
async fn create_team_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS team (
            team_id TEXT PRIMARY KEY,
            team_code TEXT NOT NULL UNIQUE,
            league TEXT,
            home_ballpark_id TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_ballpark_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ballpark (
            ballpark_id TEXT PRIMARY KEY,
            ballpark_name TEXT NOT NULL UNIQUE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Natural key: (home, visiting, date, daily game number)
async fn create_game_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS game (
            game_id TEXT PRIMARY KEY,
            home_team_id TEXT NOT NULL REFERENCES team(team_id),
            visiting_team_id TEXT NOT NULL REFERENCES team(team_id),
            ballpark_id TEXT NOT NULL REFERENCES ballpark(ballpark_id),
            date TEXT NOT NULL,
            daily_game_number INTEGER NOT NULL,
            verified INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (home_team_id, visiting_team_id, date, daily_game_number)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_player_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS player (
            player_id TEXT PRIMARY KEY,
            player_name TEXT NOT NULL,
            team_id TEXT NOT NULL REFERENCES team(team_id),
            player_batting_handedness TEXT,
            player_pitching_handedness TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (player_name, team_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_player_team ON player(team_id)")
        .execute(pool)
        .await?;

    Ok(())
}
