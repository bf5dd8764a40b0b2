//! Tracking export fixtures
//!
//! Minimal pitch-data and player-positioning CSVs carrying the headers the
//! ingest path reads.

use std::path::Path;

pub const BALLPARK: &str = "ClipperMagazine";
pub const GAME_DATE: &str = "2024-06-29";

const PITCH_HEADER: &str = "PitchNo,Date,Time,Inning,Top/Bottom,Outs,Pitcher,PitcherThrows,\
PitcherTeam,Batter,BatterSide,BatterTeam,Catcher,CatcherThrows,CatcherTeam,PitchCall,\
PlayResult,RelSpeed,HomeTeam,AwayTeam";

const POSITIONING_HEADER: &str = "PitchNo,Date,Time,PitcherTeam,PitchCall,PlayResult,\
DetectedShift,1B_Name,1B_PositionAtReleaseX,1B_PositionAtReleaseZ,SS_Name,\
SS_PositionAtReleaseX,SS_PositionAtReleaseZ";

/// One pitch-data record
#[derive(Debug, Clone)]
pub struct PitchRow {
    pub pitch_no: String,
    pub pitcher: String,
    pub pitcher_throws: String,
    pub batter: String,
    pub batter_side: String,
    pub rel_speed: String,
    pub home_team: String,
    pub away_team: String,
}

impl PitchRow {
    /// LAN hosting LI: LI pitcher against LAN batter
    pub fn new(pitch_no: u32) -> Self {
        Self {
            pitch_no: pitch_no.to_string(),
            pitcher: "Arm, Strong".to_string(),
            pitcher_throws: "Right".to_string(),
            batter: "Doe, Jane".to_string(),
            batter_side: "Left".to_string(),
            rel_speed: "88.4".to_string(),
            home_team: "LAN".to_string(),
            away_team: "LI".to_string(),
        }
    }

    pub fn batter(mut self, name: &str, side: &str) -> Self {
        self.batter = name.to_string();
        self.batter_side = side.to_string();
        self
    }

    pub fn rel_speed(mut self, value: &str) -> Self {
        self.rel_speed = value.to_string();
        self
    }

    pub fn pitch_no(mut self, value: &str) -> Self {
        self.pitch_no = value.to_string();
        self
    }

    fn to_line(&self) -> String {
        format!(
            "{},{},12:00:01,1,Top,0,\"{}\",{},LI,\"{}\",{},LAN,\"Mask, Iron\",Right,LI,StrikeCalled,Undefined,{},{},{}",
            self.pitch_no,
            GAME_DATE,
            self.pitcher,
            self.pitcher_throws,
            self.batter,
            self.batter_side,
            self.rel_speed,
            self.home_team,
            self.away_team,
        )
    }
}

/// One player-positioning record (fielders on the pitching team, LI)
#[derive(Debug, Clone)]
pub struct PositioningRow {
    pub pitch_no: u32,
    pub first_base: String,
    pub shortstop: String,
}

impl PositioningRow {
    pub fn new(pitch_no: u32) -> Self {
        Self {
            pitch_no,
            first_base: "First, Basey".to_string(),
            shortstop: "Short, Stop".to_string(),
        }
    }

    fn to_line(&self) -> String {
        format!(
            "{},{},12:00:01,LI,StrikeCalled,Undefined,None,\"{}\",60.5,1.2,\"{}\",-10.25,130.0",
            self.pitch_no, GAME_DATE, self.first_base, self.shortstop,
        )
    }
}

pub fn pitch_csv(rows: &[PitchRow]) -> String {
    let mut csv = format!("{}\n", PITCH_HEADER);
    for row in rows {
        csv.push_str(&row.to_line());
        csv.push('\n');
    }
    csv
}

pub fn positioning_csv(rows: &[PositioningRow]) -> String {
    let mut csv = format!("{}\n", POSITIONING_HEADER);
    for row in rows {
        csv.push_str(&row.to_line());
        csv.push('\n');
    }
    csv
}

/// Write an object into a directory-backed bucket
pub fn put_object(bucket_root: &Path, key: &str, body: &str) {
    let path = bucket_root.join(key);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}
