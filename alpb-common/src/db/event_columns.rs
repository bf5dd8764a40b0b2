//! Event-row column catalog
//!
//! Maps tracking-export CSV headers onto `pitch` table columns. Pitch-data
//! files and player-positioning files write disjoint column sets (apart from a
//! few shared descriptive columns) into the same row, keyed by
//! (`game_id`, `pitch_number`).
//!
//! This list is the only source of column names used to build dynamic SQL.

/// Storage class of a passthrough column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Real,
    Text,
    /// Text where the export's `Undefined` placeholder means null
    Label,
}

impl ColumnKind {
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnKind::Integer => "INTEGER",
            ColumnKind::Real => "REAL",
            ColumnKind::Text | ColumnKind::Label => "TEXT",
        }
    }
}

/// One CSV header copied verbatim into one table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventColumn {
    pub header: &'static str,
    pub column: &'static str,
    pub kind: ColumnKind,
}

const fn col(header: &'static str, column: &'static str, kind: ColumnKind) -> EventColumn {
    EventColumn { header, column, kind }
}

/// A player reference resolved to a `player_id` column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantColumn {
    /// Target column (`TEXT REFERENCES player`)
    pub column: &'static str,
    pub name_header: &'static str,
    pub handedness_header: Option<&'static str>,
    pub team_header: &'static str,
    /// Role name handed to the player resolver
    pub role: &'static str,
}

const fn participant(
    column: &'static str,
    name_header: &'static str,
    handedness_header: Option<&'static str>,
    team_header: &'static str,
    role: &'static str,
) -> ParticipantColumn {
    ParticipantColumn {
        column,
        name_header,
        handedness_header,
        team_header,
        role,
    }
}

/// CSV header carrying the per-game pitch sequence number
pub const PITCH_NUMBER_HEADER: &str = "PitchNo";

/// CSV header carrying the game date
pub const DATE_HEADER: &str = "Date";

pub const HOME_TEAM_HEADER: &str = "HomeTeam";
pub const AWAY_TEAM_HEADER: &str = "AwayTeam";

use ColumnKind::{Integer, Label, Real, Text};

pub const PITCH_PARTICIPANTS: &[ParticipantColumn] = &[
    participant("pitcher_id", "Pitcher", Some("PitcherThrows"), "PitcherTeam", "pitcher"),
    participant("batter_id", "Batter", Some("BatterSide"), "BatterTeam", "batter"),
    participant("catcher_id", "Catcher", Some("CatcherThrows"), "CatcherTeam", "catcher"),
];

/// Fielders are always on the pitching team
pub const POSITIONING_PARTICIPANTS: &[ParticipantColumn] = &[
    participant("first_b_player_id", "1B_Name", None, "PitcherTeam", "defense"),
    participant("second_b_player_id", "2B_Name", None, "PitcherTeam", "defense"),
    participant("third_b_player_id", "3B_Name", None, "PitcherTeam", "defense"),
    participant("ss_player_id", "SS_Name", None, "PitcherTeam", "defense"),
    participant("lf_player_id", "LF_Name", None, "PitcherTeam", "defense"),
    participant("cf_player_id", "CF_Name", None, "PitcherTeam", "defense"),
    participant("rf_player_id", "RF_Name", None, "PitcherTeam", "defense"),
];

pub const PITCH_COLUMNS: &[EventColumn] = &[
    // Game situation
    col("Date", "date", Text),
    col("Time", "time", Text),
    col("LocalDateTime", "local_date_time", Text),
    col("Inning", "inning", Integer),
    col("Top/Bottom", "top_or_bottom", Text),
    col("Outs", "outs", Integer),
    col("Balls", "balls", Integer),
    col("Strikes", "strikes", Integer),
    col("PAofInning", "pa_of_inning", Integer),
    col("PitchofPA", "pitch_of_pa", Integer),
    col("PitcherThrows", "pitcher_throws", Text),
    col("PitcherTeam", "pitcher_team_code", Text),
    col("BatterSide", "batter_side", Text),
    col("BatterTeam", "batter_team_code", Text),
    col("PitcherSet", "pitcher_set", Label),
    col("CatcherThrows", "catcher_throws", Text),
    // Classification
    col("TaggedPitchType", "tagged_pitch_type", Text),
    col("AutoPitchType", "auto_pitch_type", Text),
    col("PitchCall", "pitch_call", Text),
    col("KorBB", "k_or_bb", Text),
    col("TaggedHitType", "tagged_hit_type", Text),
    col("AutoHitType", "auto_hit_type", Text),
    col("PlayResult", "play_result", Label),
    col("OutsOnPlay", "outs_on_play", Integer),
    col("RunsScored", "runs_scored", Integer),
    col("Notes", "notes", Text),
    // Release
    col("RelSpeed", "rel_speed", Real),
    col("VertRelAngle", "vert_rel_angle", Real),
    col("HorzRelAngle", "horz_rel_angle", Real),
    col("SpinRate", "spin_rate", Real),
    col("SpinAxis", "spin_axis", Real),
    col("Tilt", "tilt", Text),
    col("RelHeight", "rel_height", Real),
    col("RelSide", "rel_side", Real),
    col("Extension", "extension", Real),
    // Movement and plate location
    col("VertBreak", "vert_break", Real),
    col("InducedVertBreak", "induced_vert_break", Real),
    col("HorzBreak", "horz_break", Real),
    col("PlateLocHeight", "plate_loc_height", Real),
    col("PlateLocSide", "plate_loc_side", Real),
    col("ZoneSpeed", "zone_speed", Real),
    col("VertApprAngle", "vert_appr_angle", Real),
    col("HorzApprAngle", "horz_appr_angle", Real),
    col("ZoneTime", "zone_time", Real),
    col("pfxx", "pfxx", Real),
    col("pfxz", "pfxz", Real),
    col("x0", "x0", Real),
    col("y0", "y0", Real),
    col("z0", "z0", Real),
    col("vx0", "vx0", Real),
    col("vy0", "vy0", Real),
    col("vz0", "vz0", Real),
    col("ax0", "ax0", Real),
    col("ay0", "ay0", Real),
    col("az0", "az0", Real),
    col("EffectiveVelo", "effective_velo", Real),
    col("MaxHeight", "max_height", Real),
    col("MeasuredDuration", "measured_duration", Real),
    col("SpeedDrop", "speed_drop", Real),
    col("PitchLastMeasuredX", "pitch_last_measured_x", Real),
    col("PitchLastMeasuredY", "pitch_last_measured_y", Real),
    col("PitchLastMeasuredZ", "pitch_last_measured_z", Real),
    col("PitchTrajectoryXc0", "pitch_trajectory_xc0", Real),
    col("PitchTrajectoryXc1", "pitch_trajectory_xc1", Real),
    col("PitchTrajectoryXc2", "pitch_trajectory_xc2", Real),
    col("PitchTrajectoryYc0", "pitch_trajectory_yc0", Real),
    col("PitchTrajectoryYc1", "pitch_trajectory_yc1", Real),
    col("PitchTrajectoryYc2", "pitch_trajectory_yc2", Real),
    col("PitchTrajectoryZc0", "pitch_trajectory_zc0", Real),
    col("PitchTrajectoryZc1", "pitch_trajectory_zc1", Real),
    col("PitchTrajectoryZc2", "pitch_trajectory_zc2", Real),
    // Batted ball
    col("ExitSpeed", "exit_speed", Real),
    col("Angle", "angle", Real),
    col("Direction", "direction", Real),
    col("HitSpinRate", "hit_spin_rate", Real),
    col("HitSpinAxis", "hit_spin_axis", Real),
    col("PositionAt110X", "position_at_110_x", Real),
    col("PositionAt110Y", "position_at_110_y", Real),
    col("PositionAt110Z", "position_at_110_z", Real),
    col("Distance", "distance", Real),
    col("LastTrackedDistance", "last_tracked_distance", Real),
    col("Bearing", "bearing", Real),
    col("HangTime", "hang_time", Real),
    col("ContactPositionX", "contact_position_x", Real),
    col("ContactPositionY", "contact_position_y", Real),
    col("ContactPositionZ", "contact_position_z", Real),
    col("HitTrajectoryXc0", "hit_trajectory_xc0", Real),
    col("HitTrajectoryXc1", "hit_trajectory_xc1", Real),
    col("HitTrajectoryXc2", "hit_trajectory_xc2", Real),
    col("HitTrajectoryXc3", "hit_trajectory_xc3", Real),
    col("HitTrajectoryXc4", "hit_trajectory_xc4", Real),
    col("HitTrajectoryXc5", "hit_trajectory_xc5", Real),
    col("HitTrajectoryXc6", "hit_trajectory_xc6", Real),
    col("HitTrajectoryXc7", "hit_trajectory_xc7", Real),
    col("HitTrajectoryXc8", "hit_trajectory_xc8", Real),
    col("HitTrajectoryYc0", "hit_trajectory_yc0", Real),
    col("HitTrajectoryYc1", "hit_trajectory_yc1", Real),
    col("HitTrajectoryYc2", "hit_trajectory_yc2", Real),
    col("HitTrajectoryYc3", "hit_trajectory_yc3", Real),
    col("HitTrajectoryYc4", "hit_trajectory_yc4", Real),
    col("HitTrajectoryYc5", "hit_trajectory_yc5", Real),
    col("HitTrajectoryYc6", "hit_trajectory_yc6", Real),
    col("HitTrajectoryYc7", "hit_trajectory_yc7", Real),
    col("HitTrajectoryYc8", "hit_trajectory_yc8", Real),
    col("HitTrajectoryZc0", "hit_trajectory_zc0", Real),
    col("HitTrajectoryZc1", "hit_trajectory_zc1", Real),
    col("HitTrajectoryZc2", "hit_trajectory_zc2", Real),
    col("HitTrajectoryZc3", "hit_trajectory_zc3", Real),
    col("HitTrajectoryZc4", "hit_trajectory_zc4", Real),
    col("HitTrajectoryZc5", "hit_trajectory_zc5", Real),
    col("HitTrajectoryZc6", "hit_trajectory_zc6", Real),
    col("HitTrajectoryZc7", "hit_trajectory_zc7", Real),
    col("HitTrajectoryZc8", "hit_trajectory_zc8", Real),
    // Catcher throw
    col("ThrowSpeed", "throw_speed", Real),
    col("PopTime", "pop_time", Real),
    col("ExchangeTime", "exchange_time", Real),
    col("TimeToBase", "time_to_base", Real),
    col("CatchPositionX", "catch_position_x", Real),
    col("CatchPositionY", "catch_position_y", Real),
    col("CatchPositionZ", "catch_position_z", Real),
    col("ThrowPositionX", "throw_position_x", Real),
    col("ThrowPositionY", "throw_position_y", Real),
    col("ThrowPositionZ", "throw_position_z", Real),
    col("BasePositionX", "base_position_x", Real),
    col("BasePositionY", "base_position_y", Real),
    col("BasePositionZ", "base_position_z", Real),
    col("ThrowTrajectoryXc0", "throw_trajectory_xc0", Real),
    col("ThrowTrajectoryXc1", "throw_trajectory_xc1", Real),
    col("ThrowTrajectoryXc2", "throw_trajectory_xc2", Real),
    col("ThrowTrajectoryYc0", "throw_trajectory_yc0", Real),
    col("ThrowTrajectoryYc1", "throw_trajectory_yc1", Real),
    col("ThrowTrajectoryYc2", "throw_trajectory_yc2", Real),
    col("ThrowTrajectoryZc0", "throw_trajectory_zc0", Real),
    col("ThrowTrajectoryZc1", "throw_trajectory_zc1", Real),
    col("ThrowTrajectoryZc2", "throw_trajectory_zc2", Real),
    // Tracking confidence
    col("HitLaunchConfidence", "hit_launch_confidence", Text),
    col("HitLandingConfidence", "hit_landing_confidence", Text),
    col("CatcherThrowCatchConfidence", "catcher_throw_catch_confidence", Text),
    col("CatcherThrowReleaseConfidence", "catcher_throw_release_confidence", Text),
    col("CatcherThrowLocationConfidence", "catcher_throw_location_confidence", Text),
    col("PitchReleaseConfidence", "pitch_release_confidence", Text),
    col("PitchLocationConfidence", "pitch_location_confidence", Text),
    col("PitchMovementConfidence", "pitch_movement_confidence", Text),
];

pub const POSITIONING_COLUMNS: &[EventColumn] = &[
    col("Date", "date", Text),
    col("Time", "time", Text),
    col("PitchCall", "pitch_call", Text),
    col("PlayResult", "play_result", Label),
    col("DetectedShift", "detected_shift", Text),
    col("1B_PositionAtReleaseX", "first_b_position_at_release_x", Real),
    col("1B_PositionAtReleaseZ", "first_b_position_at_release_z", Real),
    col("2B_PositionAtReleaseX", "second_b_position_at_release_x", Real),
    col("2B_PositionAtReleaseZ", "second_b_position_at_release_z", Real),
    col("3B_PositionAtReleaseX", "third_b_position_at_release_x", Real),
    col("3B_PositionAtReleaseZ", "third_b_position_at_release_z", Real),
    col("SS_PositionAtReleaseX", "ss_position_at_release_x", Real),
    col("SS_PositionAtReleaseZ", "ss_position_at_release_z", Real),
    col("LF_PositionAtReleaseX", "lf_position_at_release_x", Real),
    col("LF_PositionAtReleaseZ", "lf_position_at_release_z", Real),
    col("CF_PositionAtReleaseX", "cf_position_at_release_x", Real),
    col("CF_PositionAtReleaseZ", "cf_position_at_release_z", Real),
    col("RF_PositionAtReleaseX", "rf_position_at_release_x", Real),
    col("RF_PositionAtReleaseZ", "rf_position_at_release_z", Real),
];

/// Every passthrough column of the `pitch` table, each column once
pub fn passthrough_columns() -> Vec<EventColumn> {
    let mut columns: Vec<EventColumn> = Vec::new();
    for column in PITCH_COLUMNS.iter().chain(POSITIONING_COLUMNS) {
        if !columns.iter().any(|c| c.column == column.column) {
            columns.push(*column);
        }
    }
    columns
}

/// Every participant column of the `pitch` table
pub fn participant_columns() -> impl Iterator<Item = &'static ParticipantColumn> {
    PITCH_PARTICIPANTS.iter().chain(POSITIONING_PARTICIPANTS)
}
