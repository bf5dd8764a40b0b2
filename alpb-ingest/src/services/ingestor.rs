//! Tracking file ingest
//!
//! One sequential pass per file: parse the name and table, resolve the game,
//! then resolve participants and upsert each row. Every statement commits on
//! its own, so a failing row never undoes the rows before it.

use crate::db::{CellValue, EventRow, RowWrite, TrackingStore};
use crate::error::{ResolveError, ResolveResult};
use crate::models::{
    FileType, GameAction, GameDescriptor, IngestOutcome, IngestReport, RowFailure, SkipReason,
    TrackingFileName,
};
use crate::services::game_resolver::GameResolver;
use crate::services::object_store::ObjectStore;
use crate::services::player_resolver::PlayerResolver;
use crate::services::row_mapper::{columns_for, convert_cell, parse_integer, participants_for};
use crate::services::sibling_locator::{MatchupTeams, SiblingLocator};
use crate::services::tracking_table::{TrackingRow, TrackingTable};
use alpb_common::db::event_columns::{DATE_HEADER, PITCH_NUMBER_HEADER};
use alpb_common::db::models::GameId;
use std::sync::Arc;

pub struct TrackingIngestor {
    store: Arc<dyn TrackingStore>,
    games: GameResolver,
    players: PlayerResolver,
    siblings: SiblingLocator,
}

impl TrackingIngestor {
    /// `objects` is the bucket searched for sibling pitch files
    pub fn new(
        store: Arc<dyn TrackingStore>,
        objects: Arc<dyn ObjectStore>,
        sibling_lookahead_days: u32,
    ) -> Self {
        Self {
            games: GameResolver::new(store.clone()),
            players: PlayerResolver::new(store.clone()),
            siblings: SiblingLocator::new(objects, sibling_lookahead_days),
            store,
        }
    }

    /// Ingest one export
    ///
    /// `key` is the bare file name or its object key. Files that cannot be
    /// attached to a game come back as [`IngestOutcome::Skipped`]; only a
    /// contract violation is returned as an error.
    pub async fn ingest(&self, key: &str, content: &[u8]) -> ResolveResult<IngestOutcome> {
        let file_name = key.rsplit('/').next().unwrap_or(key).to_string();
        tracing::info!(file = %file_name, bytes = content.len(), "Ingesting tracking file");

        match self.ingest_file(key, content).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                let reason = err.into_skip_reason()?;
                tracing::warn!(file = %file_name, reason = ?reason, "Skipped tracking file");
                Ok(IngestOutcome::Skipped { file_name, reason })
            }
        }
    }

    async fn ingest_file(&self, key: &str, content: &[u8]) -> ResolveResult<IngestOutcome> {
        let file = TrackingFileName::parse(key)?;
        let table = TrackingTable::from_bytes(content)?;

        if table.is_empty() {
            tracing::info!(file = %file.name, "Tracking file has no data rows");
            return Ok(IngestOutcome::Skipped {
                file_name: file.name,
                reason: SkipReason::EmptyFile,
            });
        }

        let descriptor = self.describe(&file, &table).await?;
        let resolved = self.games.resolve(&descriptor).await?;

        let Some(game_id) = resolved.target() else {
            tracing::info!(file = %file.name, game_id = %resolved.game_id, "Stale unverified delivery");
            return Ok(IngestOutcome::Skipped {
                file_name: file.name,
                reason: SkipReason::StaleUnverified {
                    game_id: resolved.game_id,
                },
            });
        };

        let report = self
            .write_rows(&file, &table, game_id, resolved.action)
            .await?;

        tracing::info!(
            file = %report.file_name,
            game_id = %report.game_id,
            inserted = report.rows_inserted,
            updated = report.rows_updated,
            failed = report.rows_failed(),
            "Ingested tracking file"
        );

        Ok(IngestOutcome::Ingested(report))
    }

    /// Game descriptor from the file name and table contents
    async fn describe(
        &self,
        file: &TrackingFileName,
        table: &TrackingTable,
    ) -> ResolveResult<GameDescriptor> {
        let teams = match file.file_type {
            FileType::Pitch => MatchupTeams::from_table(table).ok_or_else(|| {
                ResolveError::LookupMiss("no home/away team in first row".to_string())
            })?,
            FileType::PlayerPositioning => self.siblings.locate_teams(file).await?,
        };

        let date = table
            .game_date(DATE_HEADER)
            .ok_or_else(|| ResolveError::LookupMiss("no usable Date cell".to_string()))?;

        Ok(GameDescriptor {
            home_team_code: teams.home_team_code,
            visiting_team_code: teams.visiting_team_code,
            ballpark_name: file.ballpark.clone(),
            date,
            daily_game_number: file.daily_game_number,
            verified: file.verified,
            file_type: file.file_type,
        })
    }

    async fn write_rows(
        &self,
        file: &TrackingFileName,
        table: &TrackingTable,
        game_id: GameId,
        game_action: GameAction,
    ) -> ResolveResult<IngestReport> {
        let mut report = IngestReport {
            file_name: file.name.clone(),
            file_type: file.file_type,
            game_id,
            game_action,
            rows_inserted: 0,
            rows_updated: 0,
            failures: Vec::new(),
        };

        for (index, row) in table.rows().enumerate() {
            let row_number = index + 1;
            let pitch_number = row.get(PITCH_NUMBER_HEADER).and_then(parse_integer);

            let written = match self.build_row(file.file_type, table, row, game_id).await? {
                Ok(event) => self
                    .store
                    .upsert_event_row(&event)
                    .await
                    .map_err(|err| err.to_string()),
                Err(message) => Err(message),
            };

            match written {
                Ok(RowWrite::Inserted) => report.rows_inserted += 1,
                Ok(RowWrite::Updated) => report.rows_updated += 1,
                Err(message) => {
                    tracing::warn!(
                        file = %file.name,
                        row = row_number,
                        pitch_number = ?pitch_number,
                        error = %message,
                        "Row not written"
                    );
                    report.failures.push(RowFailure {
                        row: row_number,
                        pitch_number,
                        message,
                    });
                }
            }
        }

        Ok(report)
    }

    /// Event row for one record
    ///
    /// The outer error is fatal for the file; the inner one is a data-quality
    /// failure confined to this row.
    async fn build_row(
        &self,
        file_type: FileType,
        table: &TrackingTable,
        row: TrackingRow<'_>,
        game_id: GameId,
    ) -> ResolveResult<Result<EventRow, String>> {
        let Some(pitch_number) = row.get(PITCH_NUMBER_HEADER).and_then(parse_integer) else {
            return Ok(Err(format!("missing or invalid {}", PITCH_NUMBER_HEADER)));
        };

        let mut values = Vec::new();

        for column in columns_for(file_type) {
            if !table.has_column(column.header) {
                continue;
            }
            match convert_cell(column.kind, row.get(column.header)) {
                Ok(value) => values.push((column.column, value)),
                Err(message) => return Ok(Err(format!("{}: {}", column.header, message))),
            }
        }

        for participant in participants_for(file_type) {
            if !table.has_column(participant.name_header) {
                continue;
            }
            let player_id = self
                .players
                .resolve_player(
                    row.get(participant.name_header),
                    participant.handedness_header.and_then(|header| row.get(header)),
                    row.get(participant.team_header),
                    participant.role,
                )
                .await?;
            values.push((participant.column, CellValue::from(player_id)));
        }

        Ok(Ok(EventRow {
            game_id,
            pitch_number,
            values,
        }))
    }
}
