//! Database access for alpb-ingest
//!
//! The resolvers talk to storage only through [`TrackingStore`], so their
//! decision logic can be exercised against any backend. [`SqliteStore`]
//! delegates to the free functions in the submodules.

pub mod games;
pub mod pitches;
pub mod players;
pub mod teams;

pub use games::GameInsert;
pub use pitches::{CellValue, EventRow, RowWrite};

use alpb_common::db::models::{
    BallparkId, GameId, GameKey, GameRecord, Handedness, NewGame, NewPlayer, PlayerId,
    PlayerRecord, TeamId,
};
use alpb_common::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::path::Path;

/// Repository operations the resolvers and the ingestor depend on
///
/// Every method is a single statement (or statement + re-read) committed on
/// return; nothing is cached between calls.
#[async_trait]
pub trait TrackingStore: Send + Sync {
    async fn find_team(&self, team_code: &str) -> Result<Option<TeamId>>;

    /// Create-if-absent; a concurrent duplicate resolves to the stored row
    async fn insert_team(&self, team_code: &str) -> Result<TeamId>;

    async fn find_ballpark(&self, ballpark_name: &str) -> Result<Option<BallparkId>>;

    async fn find_game(&self, key: &GameKey) -> Result<Option<GameRecord>>;

    /// Create-if-absent on the natural key
    async fn insert_game(&self, game: &NewGame) -> Result<GameInsert>;

    /// Flip unverified to verified; false when the row was already verified
    async fn set_verified(&self, game_id: GameId) -> Result<bool>;

    async fn find_player(&self, name: &str, team_id: TeamId) -> Result<Option<PlayerRecord>>;

    /// Create-if-absent on (name, team)
    async fn insert_player(&self, player: &NewPlayer) -> Result<PlayerId>;

    /// Apply merged handedness
    ///
    /// `batting` overwrites the stored value; `pitching` only fills an
    /// unknown one. `None` leaves the field untouched.
    async fn update_player_handedness(
        &self,
        player_id: PlayerId,
        batting: Option<Handedness>,
        pitching: Option<Handedness>,
    ) -> Result<()>;

    async fn upsert_event_row(&self, row: &EventRow) -> Result<RowWrite>;
}

/// SQLite-backed store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database file and bring its schema up to date
    pub async fn open(db_path: &Path) -> Result<Self> {
        let pool = alpb_common::db::init_database(db_path).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TrackingStore for SqliteStore {
    async fn find_team(&self, team_code: &str) -> Result<Option<TeamId>> {
        teams::find_team_by_code(&self.pool, team_code).await
    }

    async fn insert_team(&self, team_code: &str) -> Result<TeamId> {
        teams::insert_team(&self.pool, team_code).await
    }

    async fn find_ballpark(&self, ballpark_name: &str) -> Result<Option<BallparkId>> {
        teams::find_ballpark_by_name(&self.pool, ballpark_name).await
    }

    async fn find_game(&self, key: &GameKey) -> Result<Option<GameRecord>> {
        games::find_game(&self.pool, key).await
    }

    async fn insert_game(&self, game: &NewGame) -> Result<GameInsert> {
        games::insert_game(&self.pool, game).await
    }

    async fn set_verified(&self, game_id: GameId) -> Result<bool> {
        games::set_verified(&self.pool, game_id).await
    }

    async fn find_player(&self, name: &str, team_id: TeamId) -> Result<Option<PlayerRecord>> {
        players::find_player(&self.pool, name, team_id).await
    }

    async fn insert_player(&self, player: &NewPlayer) -> Result<PlayerId> {
        players::insert_player(&self.pool, player).await
    }

    async fn update_player_handedness(
        &self,
        player_id: PlayerId,
        batting: Option<Handedness>,
        pitching: Option<Handedness>,
    ) -> Result<()> {
        if let Some(batting) = batting {
            players::set_batting_handedness(&self.pool, player_id, batting).await?;
        }
        if let Some(pitching) = pitching {
            players::fill_pitching_handedness(&self.pool, player_id, pitching).await?;
        }
        Ok(())
    }

    async fn upsert_event_row(&self, row: &EventRow) -> Result<RowWrite> {
        pitches::upsert_event_row(&self.pool, row).await
    }
}
