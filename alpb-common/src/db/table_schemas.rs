//! Table Schema Definitions
//!
//! The `pitch` event table is defined declaratively: fixed key and participant
//! columns followed by every passthrough column in the event-column catalog.
//! Adding a header to the catalog adds the column on the next startup.

use crate::db::event_columns::{participant_columns, passthrough_columns};
use crate::db::schema_sync::{ColumnDefinition, SchemaSync, TableSchema};
use crate::Result;
use sqlx::SqlitePool;

/// `pitch` table: one row per (game, pitch number)
pub struct PitchTableSchema;

impl TableSchema for PitchTableSchema {
    fn table_name() -> &'static str {
        "pitch"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = vec![
            ColumnDefinition::new("pitch_id", "TEXT").primary_key(),
            ColumnDefinition::new("game_id", "TEXT")
                .not_null()
                .references("game(game_id)"),
            ColumnDefinition::new("pitch_number", "INTEGER").not_null(),
        ];

        columns.extend(
            participant_columns()
                .map(|p| ColumnDefinition::new(p.column, "TEXT").references("player(player_id)")),
        );

        columns.extend(
            passthrough_columns()
                .into_iter()
                .map(|c| ColumnDefinition::new(c.column, c.kind.sql_type())),
        );

        // Written by the upsert itself: ALTER TABLE cannot add a column
        // whose default is CURRENT_TIMESTAMP.
        columns.push(ColumnDefinition::new("created_at", "TIMESTAMP"));
        columns.push(ColumnDefinition::new("updated_at", "TIMESTAMP"));

        columns
    }

    fn table_constraints() -> Vec<String> {
        vec!["UNIQUE (game_id, pitch_number)".to_string()]
    }
}

/// Create and synchronize all declaratively defined tables
pub async fn sync_all_table_schemas(pool: &SqlitePool) -> Result<()> {
    SchemaSync::create_table::<PitchTableSchema>(pool).await?;
    SchemaSync::sync_table::<PitchTableSchema>(pool).await?;
    Ok(())
}
