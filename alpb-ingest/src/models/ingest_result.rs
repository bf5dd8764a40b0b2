//! Ingest outcomes
//!
//! A file is either written (possibly with some failed rows) or skipped as a
//! whole. Neither case is a process failure; both are reported as JSON by the
//! command line.

use super::file_name::FileType;
use alpb_common::db::models::GameId;
use serde::Serialize;

/// What the game resolver did for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameAction {
    /// No game matched; a new one was created
    Insert,
    /// Rows attach to the existing game as-is
    Attach,
    /// Existing unverified game flipped to verified
    Promote,
    /// Unverified delivery for an already verified game
    DiscardStale,
}

/// Why a whole file was not written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    InvalidFileName { detail: String },
    MalformedFile { detail: String },
    EmptyFile,
    LookupMiss { detail: String },
    SiblingNotFound,
    StaleUnverified { game_id: GameId },
    StoreFailure { detail: String },
}

/// One row that could not be written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFailure {
    /// 1-based data row (header excluded)
    pub row: usize,
    pub pitch_number: Option<i64>,
    pub message: String,
}

/// Summary of a written file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestReport {
    pub file_name: String,
    pub file_type: FileType,
    pub game_id: GameId,
    pub game_action: GameAction,
    pub rows_inserted: usize,
    pub rows_updated: usize,
    pub failures: Vec<RowFailure>,
}

impl IngestReport {
    pub fn rows_written(&self) -> usize {
        self.rows_inserted + self.rows_updated
    }

    pub fn rows_failed(&self) -> usize {
        self.failures.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IngestOutcome {
    Ingested(IngestReport),
    Skipped { file_name: String, reason: SkipReason },
}

impl IngestOutcome {
    pub fn game_id(&self) -> Option<GameId> {
        match self {
            IngestOutcome::Ingested(report) => Some(report.game_id),
            IngestOutcome::Skipped { .. } => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            IngestOutcome::Ingested(_) => None,
            IngestOutcome::Skipped { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_serializes_with_tags() {
        let outcome = IngestOutcome::Skipped {
            file_name: "x.csv".to_string(),
            reason: SkipReason::LookupMiss {
                detail: "unknown ballpark".to_string(),
            },
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "skipped");
        assert_eq!(json["reason"]["reason"], "lookup_miss");
        assert_eq!(json["reason"]["detail"], "unknown ballpark");
    }

    #[test]
    fn test_report_counts() {
        let report = IngestReport {
            file_name: "x.csv".to_string(),
            file_type: FileType::Pitch,
            game_id: GameId::new(),
            game_action: GameAction::Insert,
            rows_inserted: 3,
            rows_updated: 2,
            failures: vec![RowFailure {
                row: 4,
                pitch_number: None,
                message: "missing PitchNo".to_string(),
            }],
        };

        assert_eq!(report.rows_written(), 5);
        assert_eq!(report.rows_failed(), 1);
        assert_eq!(serde_json::to_value(&report).unwrap()["game_action"], "insert");
    }
}
