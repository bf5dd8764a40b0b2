//! Player resolution
//!
//! Maps a freeform display name on a team to a stable player id, creating
//! players on first sight and folding later handedness observations into
//! the stored record.

use crate::db::TrackingStore;
use crate::error::{ResolveError, ResolveResult};
use crate::services::team_lookup::{normalize_team_code, TeamLookup};
use alpb_common::db::models::{Handedness, NewPlayer, PlayerId};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Role a player appears in on an event row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerRole {
    Pitcher,
    Batter,
    Catcher,
    Defense,
}

impl FromStr for PlayerRole {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pitcher" => Ok(PlayerRole::Pitcher),
            "batter" => Ok(PlayerRole::Batter),
            "catcher" => Ok(PlayerRole::Catcher),
            "defense" => Ok(PlayerRole::Defense),
            _ => Err(ResolveError::ContractViolation(format!(
                "unknown player role '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerRole::Pitcher => "pitcher",
            PlayerRole::Batter => "batter",
            PlayerRole::Catcher => "catcher",
            PlayerRole::Defense => "defense",
        };
        f.write_str(name)
    }
}

/// Empty, whitespace-only and `nan` names identify nobody
pub fn is_missing_name(name: Option<&str>) -> bool {
    match name {
        None => true,
        Some(name) => {
            let name = name.trim();
            name.is_empty() || name.eq_ignore_ascii_case("nan")
        }
    }
}

/// Fold a batting observation into the stored value
///
/// Two different known sides make a switch hitter; `Switch` is sticky and
/// an unknown observation changes nothing.
pub fn merge_batting(stored: Option<Handedness>, observed: Option<Handedness>) -> Option<Handedness> {
    match (stored, observed) {
        (stored, None) => stored,
        (None, observed) => observed,
        (Some(Handedness::Switch), _) => Some(Handedness::Switch),
        (Some(stored), Some(observed)) if stored != observed => Some(Handedness::Switch),
        (stored, _) => stored,
    }
}

/// Pitching handedness is set once and never revised
pub fn merge_pitching(
    stored: Option<Handedness>,
    observed: Option<Handedness>,
) -> Option<Handedness> {
    stored.or(observed)
}

pub struct PlayerResolver {
    store: Arc<dyn TrackingStore>,
    teams: TeamLookup,
}

impl PlayerResolver {
    pub fn new(store: Arc<dyn TrackingStore>) -> Self {
        let teams = TeamLookup::new(store.clone());
        Self { store, teams }
    }

    /// Resolve a player reference on an event row
    ///
    /// Returns `Ok(None)` for a missing name and for any lookup or store
    /// failure (logged), so the row is still written with a null
    /// participant. An unknown `role` is the only error.
    pub async fn resolve_player(
        &self,
        name: Option<&str>,
        handedness: Option<&str>,
        team_code: Option<&str>,
        role: &str,
    ) -> ResolveResult<Option<PlayerId>> {
        let name = match name {
            Some(name) if !is_missing_name(Some(name)) => name.trim(),
            _ => return Ok(None),
        };

        let role: PlayerRole = role.parse()?;
        let observed = Handedness::from_observation(handedness);

        let Some(team_code) = team_code.and_then(normalize_team_code) else {
            tracing::warn!(player = %name, role = %role, "Player reference without a team code");
            return Ok(None);
        };

        match self.resolve_on_team(name, &team_code, role, observed).await {
            Ok(player_id) => Ok(Some(player_id)),
            Err(err) => {
                tracing::warn!(
                    player = %name,
                    team_code = %team_code,
                    role = %role,
                    error = %err,
                    "Player resolution failed"
                );
                Ok(None)
            }
        }
    }

    async fn resolve_on_team(
        &self,
        name: &str,
        team_code: &str,
        role: PlayerRole,
        observed: Option<Handedness>,
    ) -> ResolveResult<PlayerId> {
        let team_id = self.teams.get_or_create_team(team_code).await?;

        let Some(existing) = self.store.find_player(name, team_id).await? else {
            let player_id = self
                .store
                .insert_player(&NewPlayer {
                    name: name.to_string(),
                    team_id,
                    batting_handedness: observed.filter(|_| role == PlayerRole::Batter),
                    pitching_handedness: observed.filter(|_| role == PlayerRole::Pitcher),
                })
                .await?;
            tracing::debug!(player = %name, team_code = %team_code, player_id = %player_id, "Created player");
            return Ok(player_id);
        };

        match role {
            PlayerRole::Batter => {
                let merged = merge_batting(existing.batting_handedness, observed);
                if merged != existing.batting_handedness {
                    self.store
                        .update_player_handedness(existing.player_id, merged, None)
                        .await?;
                }
            }
            PlayerRole::Pitcher => {
                let merged = merge_pitching(existing.pitching_handedness, observed);
                if merged != existing.pitching_handedness {
                    self.store
                        .update_player_handedness(existing.player_id, None, merged)
                        .await?;
                }
            }
            PlayerRole::Catcher | PlayerRole::Defense => {}
        }

        Ok(existing.player_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::players::{count_players, load_player};
    use crate::db::test_support::memory_store;
    use alpb_common::db::models::Handedness::{Left, Right, Switch};

    #[test]
    fn test_role_parsing() {
        assert_eq!("Pitcher".parse::<PlayerRole>().unwrap(), PlayerRole::Pitcher);
        assert_eq!("DEFENSE".parse::<PlayerRole>().unwrap(), PlayerRole::Defense);
        assert!(matches!(
            "umpire".parse::<PlayerRole>(),
            Err(ResolveError::ContractViolation(_))
        ));
    }

    #[test]
    fn test_merge_batting() {
        assert_eq!(merge_batting(None, None), None);
        assert_eq!(merge_batting(None, Some(Left)), Some(Left));
        assert_eq!(merge_batting(Some(Left), None), Some(Left));
        assert_eq!(merge_batting(Some(Left), Some(Left)), Some(Left));
        assert_eq!(merge_batting(Some(Left), Some(Right)), Some(Switch));
        assert_eq!(merge_batting(Some(Switch), Some(Right)), Some(Switch));
        assert_eq!(merge_batting(Some(Switch), None), Some(Switch));
        assert_eq!(merge_batting(Some(Right), Some(Switch)), Some(Switch));
    }

    #[test]
    fn test_merge_pitching() {
        assert_eq!(merge_pitching(None, Some(Right)), Some(Right));
        assert_eq!(merge_pitching(Some(Right), Some(Left)), Some(Right));
        assert_eq!(merge_pitching(Some(Left), None), Some(Left));
    }

    #[test]
    fn test_missing_names() {
        assert!(is_missing_name(None));
        assert!(is_missing_name(Some("")));
        assert!(is_missing_name(Some("  ")));
        assert!(is_missing_name(Some("nan")));
        assert!(is_missing_name(Some("NaN")));
        assert!(!is_missing_name(Some("Nan, Zhou")));
    }

    #[tokio::test]
    async fn test_new_player_stores_role_field_only() {
        let store = memory_store().await;
        let resolver = PlayerResolver::new(store.clone());

        let catcher = resolver
            .resolve_player(Some("Mask, Iron"), Some("Right"), Some("LAN"), "catcher")
            .await
            .unwrap()
            .unwrap();
        let stored = load_player(store.pool(), catcher).await.unwrap().unwrap();
        assert_eq!(stored.batting_handedness, None);
        assert_eq!(stored.pitching_handedness, None);

        let pitcher = resolver
            .resolve_player(Some("Arm, Strong"), Some("Left"), Some("LAN"), "pitcher")
            .await
            .unwrap()
            .unwrap();
        let stored = load_player(store.pool(), pitcher).await.unwrap().unwrap();
        assert_eq!(stored.pitching_handedness, Some(Left));
        assert_eq!(stored.batting_handedness, None);
    }

    #[tokio::test]
    async fn test_missing_team_code_yields_none() {
        let store = memory_store().await;
        let resolver = PlayerResolver::new(store.clone());

        let result = resolver
            .resolve_player(Some("Doe, Jane"), None, Some(" "), "batter")
            .await
            .unwrap();
        assert_eq!(result, None);
        assert_eq!(count_players(store.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_undefined_handedness_is_unknown() {
        let store = memory_store().await;
        let resolver = PlayerResolver::new(store.clone());

        let id = resolver
            .resolve_player(Some("Doe, Jane"), Some("Undefined"), Some("LAN"), "batter")
            .await
            .unwrap()
            .unwrap();
        let stored = load_player(store.pool(), id).await.unwrap().unwrap();
        assert_eq!(stored.batting_handedness, None);
    }
}
