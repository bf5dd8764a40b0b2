//! Game descriptor handed to the game resolver

use super::file_name::FileType;
use chrono::NaiveDate;

/// What a file says about the game its rows belong to
///
/// Team codes are raw export values; the resolver normalizes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDescriptor {
    pub home_team_code: String,
    pub visiting_team_code: String,
    pub ballpark_name: String,
    pub date: NaiveDate,
    pub daily_game_number: u32,
    pub verified: bool,
    pub file_type: FileType,
}
