//! CSV cell to column value conversion

use crate::db::CellValue;
use crate::models::FileType;
use alpb_common::db::event_columns::{
    ColumnKind, EventColumn, ParticipantColumn, PITCH_COLUMNS, PITCH_PARTICIPANTS,
    POSITIONING_COLUMNS, POSITIONING_PARTICIPANTS,
};

/// Passthrough columns written by a file type
pub fn columns_for(file_type: FileType) -> &'static [EventColumn] {
    match file_type {
        FileType::Pitch => PITCH_COLUMNS,
        FileType::PlayerPositioning => POSITIONING_COLUMNS,
    }
}

/// Player references carried by a file type
pub fn participants_for(file_type: FileType) -> &'static [ParticipantColumn] {
    match file_type {
        FileType::Pitch => PITCH_PARTICIPANTS,
        FileType::PlayerPositioning => POSITIONING_PARTICIPANTS,
    }
}

/// Integer cell, accepting whole floats such as `12.0`
pub fn parse_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    let value = raw.parse::<f64>().ok()?;
    let in_range = value >= i64::MIN as f64 && value <= i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}

/// Typed value for one cell; `Err` carries a data-quality message
pub fn convert_cell(kind: ColumnKind, raw: Option<&str>) -> Result<CellValue, String> {
    let Some(raw) = raw else {
        return Ok(CellValue::Null);
    };

    match kind {
        ColumnKind::Integer => parse_integer(raw)
            .map(CellValue::Integer)
            .ok_or_else(|| format!("expected an integer, got '{}'", raw)),
        ColumnKind::Real => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(CellValue::Real)
            .ok_or_else(|| format!("expected a number, got '{}'", raw)),
        ColumnKind::Text => Ok(CellValue::Text(raw.to_string())),
        ColumnKind::Label if raw.eq_ignore_ascii_case("undefined") => Ok(CellValue::Null),
        ColumnKind::Label => Ok(CellValue::Text(raw.to_string())),
    }
}
