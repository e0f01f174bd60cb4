//! Cross-cutting error types.
//!
//! Bad data in count records is never an error: it is flagged by the rule
//! checks. These errors cover values that cannot be represented at all, such
//! as an unknown distance code handed to [`crate::DistanceCode::from_str`].

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A location string that is not on the W3..>E3 scale.
    #[error("Unknown distance code: '{0}'")]
    UnknownDistanceCode(String),

    /// A session whose end lies before its start.
    #[error("Invalid count session for {telpost}: end {end} is before start {start}")]
    InvertedSession {
        telpost: String,
        start: String,
        end: String,
    },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
