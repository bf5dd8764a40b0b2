//! Error types for alpb-ingest
//!
//! Only [`ResolveError::ContractViolation`] is fatal for a call. Every other
//! variant means "do not write this file" and is reported as a skip.

use crate::models::SkipReason;
use thiserror::Error;

/// Failure while resolving a tracking file against the store
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Unknown ballpark, missing date, unreadable team fields
    #[error("Lookup miss: {0}")]
    LookupMiss(String),

    /// No sibling pitch-data file inside the lookahead window
    #[error("No sibling pitch file for {file_name} within {lookahead_days} day(s)")]
    SiblingNotFound {
        file_name: String,
        lookahead_days: u32,
    },

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    /// Not parseable as a tracking export
    #[error("Malformed file: {0}")]
    MalformedFile(String),

    /// Caller handed the resolver something outside its contract
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Store error: {0}")]
    Store(#[from] alpb_common::Error),
}

impl ResolveError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ResolveError::ContractViolation(_))
    }

    /// Skip classification, or the error itself when it must propagate
    pub fn into_skip_reason(self) -> Result<SkipReason, ResolveError> {
        match self {
            ResolveError::LookupMiss(detail) => Ok(SkipReason::LookupMiss { detail }),
            ResolveError::SiblingNotFound { .. } => Ok(SkipReason::SiblingNotFound),
            ResolveError::InvalidFileName(detail) => Ok(SkipReason::InvalidFileName { detail }),
            ResolveError::MalformedFile(detail) => Ok(SkipReason::MalformedFile { detail }),
            ResolveError::Store(err) => Ok(SkipReason::StoreFailure {
                detail: err.to_string(),
            }),
            fatal @ ResolveError::ContractViolation(_) => Err(fatal),
        }
    }
}

impl From<csv::Error> for ResolveError {
    fn from(err: csv::Error) -> Self {
        ResolveError::MalformedFile(err.to_string())
    }
}

pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
