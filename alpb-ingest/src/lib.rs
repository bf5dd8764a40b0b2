//! alpb-ingest library interface
//!
//! Resolves tracking exports (pitch data and player positioning) against the
//! game/team/player store and upserts their rows. The binary in `main.rs` is
//! a thin command-line layer over [`services::TrackingIngestor`].

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ResolveError, ResolveResult};

/// Build identification stamped by `build.rs`
pub fn build_info() -> String {
    format!(
        "{} ({} {}, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("ALPB_GIT_HASH"),
        env!("ALPB_BUILD_PROFILE"),
        env!("ALPB_BUILD_TIMESTAMP"),
    )
}
