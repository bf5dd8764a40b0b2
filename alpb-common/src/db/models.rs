//! Database models
//!
//! Every entity is keyed by an opaque UUID stored as TEXT; lookups go through
//! the natural keys documented on each type.

use crate::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(crate::uuid_utils::generate())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id!(
    /// `team.team_id`
    TeamId
);
entity_id!(
    /// `ballpark.ballpark_id`
    BallparkId
);
entity_id!(
    /// `game.game_id`
    GameId
);
entity_id!(
    /// `player.player_id`
    PlayerId
);

/// Handedness of a batter or pitcher
///
/// "Unknown" is modelled as `Option::None` rather than a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
    Switch,
}

impl Handedness {
    /// Storage text
    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
            Handedness::Switch => "Switch",
        }
    }

    /// Interpret a raw export cell
    ///
    /// `Undefined`, blank and `nan` cells carry no information and map to
    /// `None`, as does any text outside the Left/Right/Switch domain.
    pub fn from_observation(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|s| s.parse().ok())
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Handedness {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Handedness::Left),
            "right" | "r" => Ok(Handedness::Right),
            "switch" | "both" | "s" => Ok(Handedness::Switch),
            other => Err(Error::InvalidInput(format!("Unknown handedness '{}'", other))),
        }
    }
}

/// `team` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub team_id: TeamId,
    pub team_code: String,
}

/// `ballpark` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballpark {
    pub ballpark_id: BallparkId,
    pub ballpark_name: String,
}

/// Natural key of a game
///
/// `daily_game_number` separates the two halves of a doubleheader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameKey {
    pub home_team_id: TeamId,
    pub visiting_team_id: TeamId,
    pub date: NaiveDate,
    pub daily_game_number: u32,
}

/// `game` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub game_id: GameId,
    pub key: GameKey,
    pub ballpark_id: BallparkId,
    pub verified: bool,
}

/// Values for a game insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub key: GameKey,
    pub ballpark_id: BallparkId,
    pub verified: bool,
}

/// `player` row, unique on (`name`, `team_id`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub player_id: PlayerId,
    pub name: String,
    pub team_id: TeamId,
    pub batting_handedness: Option<Handedness>,
    pub pitching_handedness: Option<Handedness>,
}

/// Values for a player insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub name: String,
    pub team_id: TeamId,
    pub batting_handedness: Option<Handedness>,
    pub pitching_handedness: Option<Handedness>,
}
