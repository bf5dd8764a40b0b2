//! Tracking export tables
//!
//! A header row followed by data records. Cells are looked up by header
//! name; blank, `nan`, `NaN` and `NULL` cells read as absent.

use crate::error::ResolveResult;
use alpb_common::time::parse_game_date;
use chrono::NaiveDate;
use std::collections::HashMap;

/// True when an export cell carries no value
pub fn is_null_cell(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || cell.eq_ignore_ascii_case("nan") || cell.eq_ignore_ascii_case("null")
}

/// Parsed CSV export held in memory
#[derive(Debug, Clone)]
pub struct TrackingTable {
    index: HashMap<String, usize>,
    records: Vec<csv::StringRecord>,
}

impl TrackingTable {
    pub fn from_bytes(content: &[u8]) -> ResolveResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content);

        let mut index = HashMap::new();
        for (position, header) in reader.headers()?.iter().enumerate() {
            // First occurrence wins on duplicated headers
            index.entry(header.to_string()).or_insert(position);
        }

        let records = reader.records().collect::<Result<Vec<_>, _>>()?;

        Ok(Self { index, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, header: &str) -> bool {
        self.index.contains_key(header)
    }

    pub fn rows(&self) -> impl Iterator<Item = TrackingRow<'_>> {
        self.records.iter().map(move |record| TrackingRow {
            index: &self.index,
            record,
        })
    }

    pub fn first_row(&self) -> Option<TrackingRow<'_>> {
        self.rows().next()
    }

    /// First non-null value of a column, scanning rows in order
    pub fn first_value(&self, header: &str) -> Option<&str> {
        let position = *self.index.get(header)?;
        self.records
            .iter()
            .filter_map(|record| record.get(position))
            .find(|cell| !is_null_cell(cell))
    }

    /// Game date from the first usable `Date` cell
    pub fn game_date(&self, header: &str) -> Option<NaiveDate> {
        self.first_value(header).and_then(parse_game_date)
    }
}

/// Borrowed view of one record
#[derive(Debug, Clone, Copy)]
pub struct TrackingRow<'a> {
    index: &'a HashMap<String, usize>,
    record: &'a csv::StringRecord,
}

impl<'a> TrackingRow<'a> {
    /// Cell under `header`, `None` for missing columns and null cells
    pub fn get(&self, header: &str) -> Option<&'a str> {
        let position = *self.index.get(header)?;
        self.record.get(position).filter(|cell| !is_null_cell(cell))
    }
}
