//! Data models for alpb-ingest

pub mod descriptor;
pub mod file_name;
pub mod ingest_result;
pub mod notification;

pub use descriptor::GameDescriptor;
pub use file_name::{FileType, TrackingFileName};
pub use ingest_result::{GameAction, IngestOutcome, IngestReport, RowFailure, SkipReason};
pub use notification::{CreatedObject, ObjectNotification};
