//! Tracking export file names
//!
//! `{yyyymmdd}-{ballpark}-{dailyGameNumber}{suffix}.csv`, for example
//! `20240629-ClipperMagazine-1_unverified.csv`. A suffix starting with
//! `_unverified` marks an unverified delivery; one ending in
//! `playerpositioning_FHC.csv` marks a player-positioning file.

use crate::error::{ResolveError, ResolveResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

const UNVERIFIED_MARKER: &str = "_unverified";
const POSITIONING_MARKER: &str = "playerpositioning_fhc.csv";

/// Kind of tracking export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Pitch,
    PlayerPositioning,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Pitch => f.write_str("pitch"),
            FileType::PlayerPositioning => f.write_str("player_positioning"),
        }
    }
}

/// Metadata carried by an export's file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingFileName {
    /// Bare file name, without any folder prefix
    pub name: String,
    /// `yyyymmdd` exactly as it appears in the name
    pub date_token: String,
    pub date: NaiveDate,
    pub ballpark: String,
    pub daily_game_number: u32,
    pub verified: bool,
    pub file_type: FileType,
}

impl TrackingFileName {
    /// Parse a bare file name or an object key (`YYYY/MM/DD/CSV/<name>`)
    pub fn parse(key: &str) -> ResolveResult<Self> {
        let name = key.rsplit('/').next().unwrap_or(key);
        let invalid = |why: &str| ResolveError::InvalidFileName(format!("{}: {}", name, why));

        if !name.to_ascii_lowercase().ends_with(".csv") {
            return Err(invalid("not a .csv file"));
        }

        let first_dash = name.find('-').ok_or_else(|| invalid("missing '-'"))?;
        let last_dash = name.rfind('-').ok_or_else(|| invalid("missing '-'"))?;
        if last_dash <= first_dash + 1 {
            return Err(invalid("missing ballpark"));
        }

        let date_token = &name[..first_dash];
        let date = alpb_common::time::parse_compact_date(date_token)
            .ok_or_else(|| invalid("date must be yyyymmdd"))?;

        let ballpark = &name[first_dash + 1..last_dash];
        let tail = &name[last_dash + 1..];

        let digits = tail.chars().take_while(|c| c.is_ascii_digit()).count();
        let daily_game_number: u32 = tail[..digits]
            .parse()
            .map_err(|_| invalid("missing daily game number"))?;

        let suffix = tail[digits..].to_ascii_lowercase();
        let verified = !suffix.starts_with(UNVERIFIED_MARKER);
        let file_type = if suffix.ends_with(POSITIONING_MARKER) {
            FileType::PlayerPositioning
        } else {
            FileType::Pitch
        };

        Ok(Self {
            name: name.to_string(),
            date_token: date_token.to_string(),
            date,
            ballpark: ballpark.to_string(),
            daily_game_number,
            verified,
            file_type,
        })
    }

    /// Names of the pitch-data files for the same game, verified first
    pub fn sibling_pitch_names(&self) -> [String; 2] {
        let stem = format!("{}-{}-{}", self.date_token, self.ballpark, self.daily_game_number);
        [
            format!("{}.csv", stem),
            format!("{}{}.csv", stem, UNVERIFIED_MARKER),
        ]
    }
}
