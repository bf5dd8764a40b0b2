//! Game resolution
//!
//! Decides which `game` row a file's events attach to. Verification only
//! moves forward: an unverified game can be promoted by a verified pitch
//! file, while an unverified delivery for a verified game is discarded.

use crate::db::{GameInsert, TrackingStore};
use crate::error::ResolveResult;
use crate::models::{FileType, GameAction, GameDescriptor};
use crate::services::team_lookup::TeamLookup;
use alpb_common::db::models::{GameId, GameKey, NewGame};
use std::sync::Arc;

/// Verification precedence table
///
/// `existing_verified` is `None` when no game matches the natural key.
/// Player-positioning files never change the verified flag.
pub fn decide_game_action(
    existing_verified: Option<bool>,
    incoming_verified: bool,
    file_type: FileType,
) -> GameAction {
    match (existing_verified, file_type) {
        (None, _) => GameAction::Insert,
        (Some(_), FileType::PlayerPositioning) => GameAction::Attach,
        (Some(false), FileType::Pitch) if incoming_verified => GameAction::Promote,
        (Some(true), FileType::Pitch) if !incoming_verified => GameAction::DiscardStale,
        (Some(_), FileType::Pitch) => GameAction::Attach,
    }
}

/// Game chosen for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedGame {
    pub game_id: GameId,
    pub action: GameAction,
}

impl ResolvedGame {
    /// Game the file's rows should be written to, if any
    pub fn target(&self) -> Option<GameId> {
        match self.action {
            GameAction::DiscardStale => None,
            _ => Some(self.game_id),
        }
    }
}

pub struct GameResolver {
    store: Arc<dyn TrackingStore>,
    teams: TeamLookup,
}

impl GameResolver {
    pub fn new(store: Arc<dyn TrackingStore>) -> Self {
        let teams = TeamLookup::new(store.clone());
        Self { store, teams }
    }

    /// Resolve `descriptor` to the game its rows belong to
    ///
    /// Lookup misses and store errors are logged and yield `None`.
    pub async fn resolve_game(&self, descriptor: &GameDescriptor) -> Option<GameId> {
        match self.resolve(descriptor).await {
            Ok(resolved) => resolved.target(),
            Err(err) => {
                tracing::warn!(
                    ballpark = %descriptor.ballpark_name,
                    date = %descriptor.date,
                    error = %err,
                    "Game resolution failed"
                );
                None
            }
        }
    }

    /// Resolve with the applied action
    ///
    /// Performs at most one game insert and at most one verified-flag update.
    /// An insert that loses to a concurrent writer is judged against the
    /// winner's row, so precedence holds either way.
    pub async fn resolve(&self, descriptor: &GameDescriptor) -> ResolveResult<ResolvedGame> {
        let home_team_id = self.teams.get_or_create_team(&descriptor.home_team_code).await?;
        let visiting_team_id = self
            .teams
            .get_or_create_team(&descriptor.visiting_team_code)
            .await?;
        let ballpark_id = self.teams.get_ballpark(&descriptor.ballpark_name).await?;

        let key = GameKey {
            home_team_id,
            visiting_team_id,
            date: descriptor.date,
            daily_game_number: descriptor.daily_game_number,
        };

        let existing = match self.store.find_game(&key).await? {
            Some(game) => game,
            None => {
                let inserted = self
                    .store
                    .insert_game(&NewGame {
                        key,
                        ballpark_id,
                        verified: descriptor.verified,
                    })
                    .await?;
                match inserted {
                    GameInsert::Created(game_id) => {
                        tracing::info!(
                            game_id = %game_id,
                            date = %descriptor.date,
                            daily_game_number = descriptor.daily_game_number,
                            verified = descriptor.verified,
                            "Created game"
                        );
                        return Ok(ResolvedGame {
                            game_id,
                            action: GameAction::Insert,
                        });
                    }
                    // Lost the insert race: judge the file against the winner's row
                    GameInsert::Existing(game) => {
                        tracing::debug!(game_id = %game.game_id, "Game created concurrently");
                        game
                    }
                }
            }
        };

        let action = decide_game_action(
            Some(existing.verified),
            descriptor.verified,
            descriptor.file_type,
        );

        match action {
            GameAction::Promote => {
                if self.store.set_verified(existing.game_id).await? {
                    tracing::info!(game_id = %existing.game_id, "Promoted game to verified");
                }
            }
            GameAction::DiscardStale => {
                tracing::info!(
                    game_id = %existing.game_id,
                    "Game already verified; discarding unverified delivery"
                );
            }
            GameAction::Insert | GameAction::Attach => {}
        }

        Ok(ResolvedGame {
            game_id: existing.game_id,
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::games::count_games;
    use crate::db::teams::insert_ballpark;
    use crate::db::test_support::memory_store;
    use crate::db::{EventRow, RowWrite, SqliteStore};
    use crate::error::ResolveError;
    use alpb_common::db::models::{
        BallparkId, GameRecord, Handedness, NewPlayer, PlayerId, PlayerRecord, TeamId,
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Store whose first `find_game` misses, as if another writer created
    /// the game between the lookup and the insert
    struct LateGameStore {
        inner: Arc<SqliteStore>,
        missed: AtomicBool,
    }

    impl LateGameStore {
        fn new(inner: Arc<SqliteStore>) -> Self {
            Self {
                inner,
                missed: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl TrackingStore for LateGameStore {
        async fn find_team(&self, team_code: &str) -> alpb_common::Result<Option<TeamId>> {
            self.inner.find_team(team_code).await
        }

        async fn insert_team(&self, team_code: &str) -> alpb_common::Result<TeamId> {
            self.inner.insert_team(team_code).await
        }

        async fn find_ballpark(&self, name: &str) -> alpb_common::Result<Option<BallparkId>> {
            self.inner.find_ballpark(name).await
        }

        async fn find_game(&self, key: &GameKey) -> alpb_common::Result<Option<GameRecord>> {
            if !self.missed.swap(true, Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.find_game(key).await
        }

        async fn insert_game(&self, game: &NewGame) -> alpb_common::Result<GameInsert> {
            self.inner.insert_game(game).await
        }

        async fn set_verified(&self, game_id: GameId) -> alpb_common::Result<bool> {
            self.inner.set_verified(game_id).await
        }

        async fn find_player(
            &self,
            name: &str,
            team_id: TeamId,
        ) -> alpb_common::Result<Option<PlayerRecord>> {
            self.inner.find_player(name, team_id).await
        }

        async fn insert_player(&self, player: &NewPlayer) -> alpb_common::Result<PlayerId> {
            self.inner.insert_player(player).await
        }

        async fn update_player_handedness(
            &self,
            player_id: PlayerId,
            batting: Option<Handedness>,
            pitching: Option<Handedness>,
        ) -> alpb_common::Result<()> {
            self.inner
                .update_player_handedness(player_id, batting, pitching)
                .await
        }

        async fn upsert_event_row(&self, row: &EventRow) -> alpb_common::Result<RowWrite> {
            self.inner.upsert_event_row(row).await
        }
    }

    fn descriptor(verified: bool, file_type: FileType, daily_game_number: u32) -> GameDescriptor {
        GameDescriptor {
            home_team_code: "LAN".to_string(),
            visiting_team_code: "LI".to_string(),
            ballpark_name: "ClipperMagazine".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 29).unwrap(),
            daily_game_number,
            verified,
            file_type,
        }
    }

    #[test]
    fn test_decision_table() {
        use FileType::{Pitch, PlayerPositioning};

        assert_eq!(decide_game_action(None, false, Pitch), GameAction::Insert);
        assert_eq!(decide_game_action(None, true, PlayerPositioning), GameAction::Insert);
        assert_eq!(decide_game_action(Some(false), true, Pitch), GameAction::Promote);
        assert_eq!(decide_game_action(Some(true), true, Pitch), GameAction::Attach);
        assert_eq!(decide_game_action(Some(false), false, Pitch), GameAction::Attach);
        assert_eq!(decide_game_action(Some(true), false, Pitch), GameAction::DiscardStale);
        for existing in [false, true] {
            for incoming in [false, true] {
                assert_eq!(
                    decide_game_action(Some(existing), incoming, PlayerPositioning),
                    GameAction::Attach
                );
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_ballpark_yields_none() {
        let store = memory_store().await;
        let resolver = GameResolver::new(store.clone());

        let result = resolver.resolve(&descriptor(false, FileType::Pitch, 1)).await;
        assert!(matches!(result, Err(ResolveError::LookupMiss(_))));
        assert_eq!(resolver.resolve_game(&descriptor(false, FileType::Pitch, 1)).await, None);
        assert_eq!(count_games(store.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_promotion_then_stale_discard() {
        let store = memory_store().await;
        insert_ballpark(store.pool(), "ClipperMagazine").await.unwrap();
        let resolver = GameResolver::new(store.clone());

        let created = resolver.resolve(&descriptor(false, FileType::Pitch, 1)).await.unwrap();
        assert_eq!(created.action, GameAction::Insert);

        let promoted = resolver.resolve(&descriptor(true, FileType::Pitch, 1)).await.unwrap();
        assert_eq!(promoted.action, GameAction::Promote);
        assert_eq!(promoted.game_id, created.game_id);

        let stale = resolver.resolve_game(&descriptor(false, FileType::Pitch, 1)).await;
        assert_eq!(stale, None);
        assert_eq!(count_games(store.pool()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_late_verified_game_discards_unverified_delivery() {
        let store = memory_store().await;
        insert_ballpark(store.pool(), "ClipperMagazine").await.unwrap();
        let verified = GameResolver::new(store.clone())
            .resolve(&descriptor(true, FileType::Pitch, 1))
            .await
            .unwrap();

        let racing = GameResolver::new(Arc::new(LateGameStore::new(store.clone())));
        let stale = racing.resolve(&descriptor(false, FileType::Pitch, 1)).await.unwrap();

        assert_eq!(stale.action, GameAction::DiscardStale);
        assert_eq!(stale.game_id, verified.game_id);
        assert_eq!(stale.target(), None);
        assert_eq!(count_games(store.pool()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_late_unverified_game_is_promoted() {
        let store = memory_store().await;
        insert_ballpark(store.pool(), "ClipperMagazine").await.unwrap();
        let unverified = GameResolver::new(store.clone())
            .resolve(&descriptor(false, FileType::Pitch, 1))
            .await
            .unwrap();

        let racing = GameResolver::new(Arc::new(LateGameStore::new(store.clone())));
        let promoted = racing.resolve(&descriptor(true, FileType::Pitch, 1)).await.unwrap();

        assert_eq!(promoted.action, GameAction::Promote);
        assert_eq!(promoted.game_id, unverified.game_id);

        let game = store
            .find_game(&GameKey {
                home_team_id: store.find_team("LAN").await.unwrap().unwrap(),
                visiting_team_id: store.find_team("LI").await.unwrap().unwrap(),
                date: NaiveDate::from_ymd_opt(2024, 6, 29).unwrap(),
                daily_game_number: 1,
            })
            .await
            .unwrap()
            .unwrap();
        assert!(game.verified);
    }
}
