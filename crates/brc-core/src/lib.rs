//! # brc-core
//!
//! Core types shared by every BRC checker crate:
//! - Count records as they arrive from Trektellen and as they leave the checker
//! - The ordered west-to-east distance scale
//! - Flag identifiers and the append-only flag set
//! - The in-memory record table
//! - Cross-cutting error types

pub mod distance;
pub mod enums;
pub mod errors;
pub mod flags;
pub mod record;
pub mod table;

pub use distance::DistanceCode;
pub use enums::{Flag, RecordKind};
pub use errors::CoreError;
pub use flags::Flags;
pub use record::{CountRecord, CountSession, RawRecord, RecordId};
pub use table::RecordTable;
