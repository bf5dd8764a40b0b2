//! Game persistence
//!
//! A game is identified by (home team, visiting team, date, daily game
//! number). The natural key is UNIQUE in the store, so at most one row can
//! exist per key even when two ingest processes race on the same game.

use alpb_common::db::models::{BallparkId, GameId, GameKey, GameRecord, NewGame, TeamId};
use alpb_common::{uuid_utils, Error, Result};
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn game_from_row(row: &SqliteRow) -> Result<GameRecord> {
    let game_id: String = row.get("game_id");
    let home_team_id: String = row.get("home_team_id");
    let visiting_team_id: String = row.get("visiting_team_id");
    let ballpark_id: String = row.get("ballpark_id");
    let date: NaiveDate = row.get("date");
    let daily_game_number: i64 = row.get("daily_game_number");

    Ok(GameRecord {
        game_id: GameId(uuid_utils::parse(&game_id)?),
        key: GameKey {
            home_team_id: TeamId(uuid_utils::parse(&home_team_id)?),
            visiting_team_id: TeamId(uuid_utils::parse(&visiting_team_id)?),
            date,
            daily_game_number: u32::try_from(daily_game_number).map_err(|_| {
                Error::Internal(format!("Invalid daily_game_number {}", daily_game_number))
            })?,
        },
        ballpark_id: BallparkId(uuid_utils::parse(&ballpark_id)?),
        verified: row.get("verified"),
    })
}

/// Load game by natural key
pub async fn find_game(pool: &SqlitePool, key: &GameKey) -> Result<Option<GameRecord>> {
    let row = sqlx::query(
        r#"
        SELECT game_id, home_team_id, visiting_team_id, ballpark_id, date,
               daily_game_number, verified
        FROM game
        WHERE home_team_id = ? AND visiting_team_id = ? AND date = ? AND daily_game_number = ?
        "#,
    )
    .bind(key.home_team_id.to_string())
    .bind(key.visiting_team_id.to_string())
    .bind(key.date)
    .bind(i64::from(key.daily_game_number))
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(game_from_row).transpose()
}

/// Outcome of a create-if-absent game insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameInsert {
    /// This call created the row
    Created(GameId),
    /// Another writer already held the key; its row as stored
    Existing(GameRecord),
}

impl GameInsert {
    pub fn game_id(&self) -> GameId {
        match self {
            GameInsert::Created(game_id) => *game_id,
            GameInsert::Existing(record) => record.game_id,
        }
    }
}

/// Insert game unless its natural key already exists
///
/// When another writer got there first the stored row is returned instead,
/// so the caller can re-apply verification precedence against it.
pub async fn insert_game(pool: &SqlitePool, game: &NewGame) -> Result<GameInsert> {
    let candidate = GameId::new();

    sqlx::query(
        r#"
        INSERT INTO game (
            game_id, home_team_id, visiting_team_id, ballpark_id, date,
            daily_game_number, verified, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        ON CONFLICT(home_team_id, visiting_team_id, date, daily_game_number) DO NOTHING
        "#,
    )
    .bind(candidate.to_string())
    .bind(game.key.home_team_id.to_string())
    .bind(game.key.visiting_team_id.to_string())
    .bind(game.ballpark_id.to_string())
    .bind(game.key.date)
    .bind(i64::from(game.key.daily_game_number))
    .bind(game.verified)
    .execute(pool)
    .await?;

    let stored = find_game(pool, &game.key)
        .await?
        .ok_or_else(|| Error::Internal("Game missing after insert".to_string()))?;

    if stored.game_id == candidate {
        Ok(GameInsert::Created(candidate))
    } else {
        Ok(GameInsert::Existing(stored))
    }
}

/// Promote game to verified
///
/// Only an unverified row is touched; returns whether this call flipped it.
pub async fn set_verified(pool: &SqlitePool, game_id: GameId) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE game
        SET verified = 1, updated_at = CURRENT_TIMESTAMP
        WHERE game_id = ? AND verified = 0
        "#,
    )
    .bind(game_id.to_string())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_games(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM game")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
