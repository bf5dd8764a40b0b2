//! # ALPB Common Library
//!
//! Shared code for the ALPB tracking-data services:
//! - Database models, schema and initialization
//! - Event-row column catalog (CSV header to table column)
//! - Configuration loading
//! - Game-date utilities

pub mod config;
pub mod db;
pub mod error;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
