//! UUID utilities
//!
//! Row identifiers are UUIDv4 values stored as TEXT.

use crate::{Error, Result};
use uuid::Uuid;

/// Generate a new row identifier
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Parse a row identifier read back from the database
pub fn parse(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| Error::Internal(format!("Invalid UUID in database '{}': {}", s, e)))
}
