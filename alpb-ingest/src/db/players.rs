//! Player persistence
//!
//! Players are unique on (`player_name`, `team_id`). Handedness is stored as
//! the `Handedness` text form; NULL means unknown.

use alpb_common::db::models::{Handedness, NewPlayer, PlayerId, PlayerRecord, TeamId};
use alpb_common::{uuid_utils, Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn decode_handedness(raw: Option<String>) -> Result<Option<Handedness>> {
    raw.map(|text| text.parse::<Handedness>()).transpose()
}

fn player_from_row(row: &SqliteRow) -> Result<PlayerRecord> {
    let player_id: String = row.get("player_id");
    let team_id: String = row.get("team_id");

    Ok(PlayerRecord {
        player_id: PlayerId(uuid_utils::parse(&player_id)?),
        name: row.get("player_name"),
        team_id: TeamId(uuid_utils::parse(&team_id)?),
        batting_handedness: decode_handedness(row.get("player_batting_handedness"))?,
        pitching_handedness: decode_handedness(row.get("player_pitching_handedness"))?,
    })
}

/// Load player by (name, team)
pub async fn find_player(
    pool: &SqlitePool,
    name: &str,
    team_id: TeamId,
) -> Result<Option<PlayerRecord>> {
    let row = sqlx::query(
        r#"
        SELECT player_id, player_name, team_id, player_batting_handedness,
               player_pitching_handedness
        FROM player
        WHERE player_name = ? AND team_id = ?
        "#,
    )
    .bind(name)
    .bind(team_id.to_string())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(player_from_row).transpose()
}

pub async fn load_player(pool: &SqlitePool, player_id: PlayerId) -> Result<Option<PlayerRecord>> {
    let row = sqlx::query(
        r#"
        SELECT player_id, player_name, team_id, player_batting_handedness,
               player_pitching_handedness
        FROM player
        WHERE player_id = ?
        "#,
    )
    .bind(player_id.to_string())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(player_from_row).transpose()
}

/// Insert player unless (name, team) already exists; returns the stored id
pub async fn insert_player(pool: &SqlitePool, player: &NewPlayer) -> Result<PlayerId> {
    let candidate = PlayerId::new();

    sqlx::query(
        r#"
        INSERT INTO player (
            player_id, player_name, team_id, player_batting_handedness,
            player_pitching_handedness, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        ON CONFLICT(player_name, team_id) DO NOTHING
        "#,
    )
    .bind(candidate.to_string())
    .bind(&player.name)
    .bind(player.team_id.to_string())
    .bind(player.batting_handedness.map(|h| h.as_str()))
    .bind(player.pitching_handedness.map(|h| h.as_str()))
    .execute(pool)
    .await?;

    find_player(pool, &player.name, player.team_id)
        .await?
        .map(|record| record.player_id)
        .ok_or_else(|| Error::Internal(format!("Player '{}' missing after insert", player.name)))
}

/// Overwrite batting handedness
pub async fn set_batting_handedness(
    pool: &SqlitePool,
    player_id: PlayerId,
    handedness: Handedness,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE player
        SET player_batting_handedness = ?, updated_at = CURRENT_TIMESTAMP
        WHERE player_id = ?
        "#,
    )
    .bind(handedness.as_str())
    .bind(player_id.to_string())
    .execute(pool)
    .await?;

    Ok(())
}

/// Fill pitching handedness; a value already present is left alone
pub async fn fill_pitching_handedness(
    pool: &SqlitePool,
    player_id: PlayerId,
    handedness: Handedness,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE player
        SET player_pitching_handedness = ?, updated_at = CURRENT_TIMESTAMP
        WHERE player_id = ? AND player_pitching_handedness IS NULL
        "#,
    )
    .bind(handedness.as_str())
    .bind(player_id.to_string())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_players(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM player")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
