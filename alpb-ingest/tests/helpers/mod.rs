//! Test Helper Utilities
//!
//! Shared utilities for testing alpb-ingest

#![allow(dead_code, unused_imports)]

pub mod db_utils;
pub mod fixtures;

pub use db_utils::{count_rows, create_test_store, has_column, seed_ballpark};
pub use fixtures::{
    pitch_csv, positioning_csv, put_object, PitchRow, PositioningRow, BALLPARK, GAME_DATE,
};
