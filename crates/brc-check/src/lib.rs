//! # brc-check
//!
//! Validation and flagging of one batch of count records:
//!
//! 1. [`ingest`] turns raw export rows into a [`RecordTable`](brc_core::RecordTable).
//! 2. [`normalize`] defaults missing times and inserts session boundaries.
//! 3. [`rules`] each scan the table and report suspect records.
//! 4. [`aggregate`] unions the reported flags onto the records.
//! 5. [`writer`] hands the flagged table on as JSONL.
//!
//! [`Checker`] runs steps 2 to 4. Records are flagged, never removed or
//! corrected.

pub mod aggregate;
pub mod context;
pub mod error;
pub mod index;
pub mod ingest;
pub mod normalize;
pub mod pipeline;
pub mod reference;
pub mod report;
pub mod rules;
pub mod writer;

pub use aggregate::AggregateSummary;
pub use context::{CheckContext, FocusPeriod};
pub use error::CheckError;
pub use ingest::BatchSelection;
pub use normalize::NormalizeSummary;
pub use pipeline::Checker;
pub use reference::ReferenceData;
pub use report::{CheckReport, RuleSummary};
pub use rules::{Rule, RuleHit};
