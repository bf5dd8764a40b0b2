//! Ingest services
//!
//! Resolvers sit on top of [`crate::db::TrackingStore`]; the ingestor drives
//! them over one tracking export at a time.

pub mod game_resolver;
pub mod ingestor;
pub mod object_store;
pub mod player_resolver;
pub mod row_mapper;
pub mod sibling_locator;
pub mod team_lookup;
pub mod tracking_table;

pub use game_resolver::{decide_game_action, GameResolver, ResolvedGame};
pub use ingestor::TrackingIngestor;
pub use object_store::{LocalBucket, ObjectStore};
pub use player_resolver::{merge_batting, merge_pitching, PlayerResolver, PlayerRole};
pub use sibling_locator::{MatchupTeams, SiblingLocator};
pub use team_lookup::{normalize_team_code, TeamLookup};
pub use tracking_table::TrackingTable;
