//! Sibling pitch-file lookup
//!
//! Player-positioning exports carry no home/visiting team columns. The teams
//! are read from the pitch-data export of the same game, which may land in
//! the same day's folder or, for late deliveries, a following day's folder.

use crate::error::{ResolveError, ResolveResult};
use crate::models::TrackingFileName;
use crate::services::object_store::ObjectStore;
use crate::services::team_lookup::normalize_team_code;
use crate::services::tracking_table::TrackingTable;
use alpb_common::db::event_columns::{AWAY_TEAM_HEADER, HOME_TEAM_HEADER};
use alpb_common::time::{days_after, delivery_folder};
use std::sync::Arc;

/// Home and visiting team codes of a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchupTeams {
    pub home_team_code: String,
    pub visiting_team_code: String,
}

impl MatchupTeams {
    /// Teams from the first data row, normalized to three-letter codes
    pub fn from_table(table: &TrackingTable) -> Option<Self> {
        let row = table.first_row()?;
        Some(Self {
            home_team_code: normalize_team_code(row.get(HOME_TEAM_HEADER)?)?,
            visiting_team_code: normalize_team_code(row.get(AWAY_TEAM_HEADER)?)?,
        })
    }
}

pub struct SiblingLocator {
    objects: Arc<dyn ObjectStore>,
    lookahead_days: u32,
}

impl SiblingLocator {
    pub fn new(objects: Arc<dyn ObjectStore>, lookahead_days: u32) -> Self {
        Self {
            objects,
            lookahead_days,
        }
    }

    /// Object keys tried for `file`, in lookup order
    ///
    /// Each day from the file's date through the lookahead window, verified
    /// sibling before unverified.
    pub fn candidate_keys(&self, file: &TrackingFileName) -> Vec<String> {
        let names = file.sibling_pitch_names();
        (0..=self.lookahead_days)
            .map_while(|offset| days_after(file.date, offset))
            .flat_map(|date| {
                let folder = delivery_folder(date);
                names
                    .iter()
                    .map(move |name| format!("{}/{}", folder, name))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Teams of the game `file` belongs to
    pub async fn locate_teams(&self, file: &TrackingFileName) -> ResolveResult<MatchupTeams> {
        let mut unreadable = None;

        for key in self.candidate_keys(file) {
            let body = match self.objects.get_object(&key).await {
                Ok(Some(body)) => body,
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "Sibling lookup failed");
                    continue;
                }
            };

            let teams = TrackingTable::from_bytes(&body)
                .ok()
                .as_ref()
                .and_then(MatchupTeams::from_table);

            match teams {
                Some(teams) => {
                    tracing::debug!(
                        file = %file.name,
                        sibling = %key,
                        home = %teams.home_team_code,
                        away = %teams.visiting_team_code,
                        "Found sibling pitch file"
                    );
                    return Ok(teams);
                }
                None => {
                    tracing::warn!(sibling = %key, "Sibling pitch file has no readable teams");
                    unreadable = Some(key);
                }
            }
        }

        match unreadable {
            Some(key) => Err(ResolveError::LookupMiss(format!(
                "no readable teams in sibling {}",
                key
            ))),
            None => Err(ResolveError::SiblingNotFound {
                file_name: file.name.clone(),
                lookahead_days: self.lookahead_days,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::object_store::LocalBucket;
    use tempfile::TempDir;

    const POSITIONING: &str = "20240629-ClipperMagazine-1_playerpositioning_FHC.csv";

    fn put(root: &std::path::Path, key: &str, body: &str) {
        let path = root.join(key);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    fn locator(dir: &TempDir, lookahead_days: u32) -> SiblingLocator {
        SiblingLocator::new(Arc::new(LocalBucket::new(dir.path())), lookahead_days)
    }

    #[test]
    fn test_candidate_key_order() {
        let dir = TempDir::new().unwrap();
        let file = TrackingFileName::parse(POSITIONING).unwrap();

        assert_eq!(
            locator(&dir, 1).candidate_keys(&file),
            vec![
                "2024/06/29/CSV/20240629-ClipperMagazine-1.csv",
                "2024/06/29/CSV/20240629-ClipperMagazine-1_unverified.csv",
                "2024/06/30/CSV/20240629-ClipperMagazine-1.csv",
                "2024/06/30/CSV/20240629-ClipperMagazine-1_unverified.csv",
            ]
        );
    }

    #[test]
    fn test_candidate_keys_stop_at_last_date() {
        let dir = TempDir::new().unwrap();
        let mut file = TrackingFileName::parse(POSITIONING).unwrap();
        file.date = chrono::NaiveDate::MAX;

        // Only the file's own day is representable
        assert_eq!(locator(&dir, 3).candidate_keys(&file).len(), 2);
    }

    #[tokio::test]
    async fn test_verified_sibling_preferred() {
        let dir = TempDir::new().unwrap();
        put(
            dir.path(),
            "2024/06/29/CSV/20240629-ClipperMagazine-1_unverified.csv",
            "PitchNo,HomeTeam,AwayTeam\n1,AAA,BBB\n",
        );
        put(
            dir.path(),
            "2024/06/29/CSV/20240629-ClipperMagazine-1.csv",
            "PitchNo,HomeTeam,AwayTeam\n1,LAN_REV,LI\n",
        );

        let file = TrackingFileName::parse(POSITIONING).unwrap();
        let teams = locator(&dir, 1).locate_teams(&file).await.unwrap();

        assert_eq!(teams.home_team_code, "LAN");
        assert_eq!(teams.visiting_team_code, "LI");
    }

    #[tokio::test]
    async fn test_late_sibling_within_window() {
        let dir = TempDir::new().unwrap();
        put(
            dir.path(),
            "2024/06/30/CSV/20240629-ClipperMagazine-1_unverified.csv",
            "PitchNo,HomeTeam,AwayTeam\n1,LAN,LI\n",
        );
        let file = TrackingFileName::parse(POSITIONING).unwrap();

        assert!(locator(&dir, 1).locate_teams(&file).await.is_ok());
        assert!(matches!(
            locator(&dir, 0).locate_teams(&file).await,
            Err(ResolveError::SiblingNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_sibling_without_teams_is_lookup_miss() {
        let dir = TempDir::new().unwrap();
        put(
            dir.path(),
            "2024/06/29/CSV/20240629-ClipperMagazine-1.csv",
            "PitchNo,HomeTeam,AwayTeam\n1,,LI\n",
        );
        let file = TrackingFileName::parse(POSITIONING).unwrap();

        assert!(matches!(
            locator(&dir, 0).locate_teams(&file).await,
            Err(ResolveError::LookupMiss(_))
        ));
    }
}
