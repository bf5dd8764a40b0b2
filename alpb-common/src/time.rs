//! Game-date utilities
//!
//! Tracking exports write the game date in more than one layout, and the
//! delivery bucket files each export under a `YYYY/MM/DD/CSV` folder.

use chrono::{Days, NaiveDate};

/// Layouts seen in the `Date` column of tracking exports
///
/// `%m/%d/%y` comes before `%m/%d/%Y`: chrono's `%Y` also accepts a
/// two-digit year and would read `06/29/24` as year 24.
const CELL_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse a `Date` cell into a calendar date
pub fn parse_game_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    CELL_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cell, fmt).ok())
}

/// Parse the `yyyymmdd` token that prefixes every export file name
pub fn parse_compact_date(token: &str) -> Option<NaiveDate> {
    if token.len() != 8 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(token, "%Y%m%d").ok()
}

/// Bucket folder holding the exports delivered on `date`
pub fn delivery_folder(date: NaiveDate) -> String {
    date.format("%Y/%m/%d/CSV").to_string()
}

/// `date` plus `days` calendar days (month and year rollover included)
///
/// `None` past the last representable date.
pub fn days_after(date: NaiveDate, days: u32) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(days)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_game_date_iso() {
        assert_eq!(parse_game_date("2024-06-29"), Some(ymd(2024, 6, 29)));
    }

    #[test]
    fn test_parse_game_date_us_layouts() {
        assert_eq!(parse_game_date("6/29/2024"), Some(ymd(2024, 6, 29)));
        assert_eq!(parse_game_date("06/29/2024"), Some(ymd(2024, 6, 29)));
        assert_eq!(parse_game_date(" 2024/06/29 "), Some(ymd(2024, 6, 29)));
        assert_eq!(parse_game_date("06/29/24"), Some(ymd(2024, 6, 29)));
        assert_eq!(parse_game_date("6/29/24"), Some(ymd(2024, 6, 29)));
    }

    #[test]
    fn test_parse_game_date_rejects_garbage() {
        assert_eq!(parse_game_date("nan"), None);
        assert_eq!(parse_game_date(""), None);
        assert_eq!(parse_game_date("2024-13-40"), None);
    }

    #[test]
    fn test_parse_compact_date() {
        assert_eq!(parse_compact_date("20240629"), Some(ymd(2024, 6, 29)));
        assert_eq!(parse_compact_date("2024069"), None);
        assert_eq!(parse_compact_date("2024O629"), None);
        assert_eq!(parse_compact_date("20240230"), None);
    }

    #[test]
    fn test_delivery_folder_is_zero_padded() {
        assert_eq!(delivery_folder(ymd(2024, 6, 9)), "2024/06/09/CSV");
    }

    #[test]
    fn test_days_after_rolls_over_month_and_year() {
        assert_eq!(days_after(ymd(2024, 6, 30), 1), Some(ymd(2024, 7, 1)));
        assert_eq!(days_after(ymd(2024, 12, 31), 1), Some(ymd(2025, 1, 1)));
        assert_eq!(days_after(ymd(2024, 2, 28), 1), Some(ymd(2024, 2, 29)));
        assert_eq!(days_after(ymd(2024, 6, 29), 0), Some(ymd(2024, 6, 29)));
    }

    #[test]
    fn test_days_after_overflow_is_none() {
        assert_eq!(days_after(NaiveDate::MAX, 1), None);
        assert_eq!(days_after(ymd(2024, 6, 29), u32::MAX), None);
    }
}
