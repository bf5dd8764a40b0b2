//! Event-row persistence
//!
//! Pitch-data and player-positioning files share the `pitch` table. Each
//! upsert writes only the columns it carries, so the two file types merge
//! into one row per (`game_id`, `pitch_number`). Column names always come
//! from the compiled-in catalog in `alpb_common::db::event_columns`.

use alpb_common::db::models::{GameId, PlayerId};
use alpb_common::{uuid_utils, Result};
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Row, Sqlite, SqlitePool};

/// Typed value for one event-row column
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Player(PlayerId),
}

impl From<Option<PlayerId>> for CellValue {
    fn from(player_id: Option<PlayerId>) -> Self {
        player_id.map_or(CellValue::Null, CellValue::Player)
    }
}

/// One event row keyed by (game, pitch number)
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub game_id: GameId,
    pub pitch_number: i64,
    pub values: Vec<(&'static str, CellValue)>,
}

/// Outcome of an event-row upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowWrite {
    Inserted,
    Updated,
}

fn bind_cell<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &'q CellValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        CellValue::Null => query.bind(None::<String>),
        CellValue::Integer(v) => query.bind(*v),
        CellValue::Real(v) => query.bind(*v),
        CellValue::Text(v) => query.bind(v.as_str()),
        CellValue::Player(id) => query.bind(id.to_string()),
    }
}

fn upsert_sql(columns: &[&str]) -> String {
    let mut insert_columns = String::from("pitch_id, game_id, pitch_number");
    let mut placeholders = String::from("?, ?, ?");
    let mut assignments = String::new();

    for column in columns {
        insert_columns.push_str(", ");
        insert_columns.push_str(column);
        placeholders.push_str(", ?");
        assignments.push_str(&format!("{column} = excluded.{column}, "));
    }

    format!(
        "INSERT INTO pitch ({insert_columns}, created_at, updated_at) \
         VALUES ({placeholders}, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP) \
         ON CONFLICT(game_id, pitch_number) DO UPDATE SET \
         {assignments}updated_at = CURRENT_TIMESTAMP \
         RETURNING pitch_id"
    )
}

/// Insert or overwrite one event row
pub async fn upsert_event_row(pool: &SqlitePool, row: &EventRow) -> Result<RowWrite> {
    let columns: Vec<&str> = row.values.iter().map(|(column, _)| *column).collect();
    let sql = upsert_sql(&columns);
    let candidate = uuid_utils::generate().to_string();

    let mut query = sqlx::query(&sql)
        .bind(candidate.as_str())
        .bind(row.game_id.to_string())
        .bind(row.pitch_number);
    for (_, value) in &row.values {
        query = bind_cell(query, value);
    }

    let stored_id: String = query.fetch_one(pool).await?.get("pitch_id");

    if stored_id == candidate {
        Ok(RowWrite::Inserted)
    } else {
        Ok(RowWrite::Updated)
    }
}

pub async fn count_event_rows(pool: &SqlitePool, game_id: GameId) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM pitch WHERE game_id = ?")
        .bind(game_id.to_string())
        .fetch_one(pool)
        .await?;
    Ok(count)
}
