//! Team and ballpark lookup
//!
//! Teams are created on first reference; ballparks must already exist.

use crate::db::TrackingStore;
use crate::error::{ResolveError, ResolveResult};
use alpb_common::db::models::{BallparkId, TeamId};
use std::sync::Arc;

/// Length of a league team code
pub const TEAM_CODE_LEN: usize = 3;

/// Canonical team code: trimmed, first three characters
///
/// Exports sometimes carry suffixed codes such as `YOR_REV2`; those map to
/// the same team as `YOR`. Blank and null-like input yields `None`.
pub fn normalize_team_code(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if crate::services::tracking_table::is_null_cell(trimmed) {
        return None;
    }
    Some(trimmed.chars().take(TEAM_CODE_LEN).collect())
}

/// Store-backed team/ballpark lookup
#[derive(Clone)]
pub struct TeamLookup {
    store: Arc<dyn TrackingStore>,
}

impl TeamLookup {
    pub fn new(store: Arc<dyn TrackingStore>) -> Self {
        Self { store }
    }

    /// Return the team for `team_code`, creating it when absent
    ///
    /// Idempotent: repeated calls with the same (normalized) code return the
    /// same id and never add a second row.
    pub async fn get_or_create_team(&self, team_code: &str) -> ResolveResult<TeamId> {
        let code = normalize_team_code(team_code)
            .ok_or_else(|| ResolveError::LookupMiss("blank team code".to_string()))?;

        if let Some(team_id) = self.store.find_team(&code).await? {
            return Ok(team_id);
        }

        let team_id = self.store.insert_team(&code).await?;
        tracing::info!(team_code = %code, team_id = %team_id, "Created team");
        Ok(team_id)
    }

    /// Lookup only; an unknown ballpark is a lookup miss
    pub async fn get_ballpark(&self, ballpark_name: &str) -> ResolveResult<BallparkId> {
        self.store
            .find_ballpark(ballpark_name)
            .await?
            .ok_or_else(|| ResolveError::LookupMiss(format!("unknown ballpark '{}'", ballpark_name)))
    }
}
