//! Count season window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// First and last day of the current count season (`%Y-%m-%d`).
///
/// Used to select the batch when no single date is requested. The start day
/// itself is excluded and the end day included, matching the season export.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SeasonConfig {
    #[serde(default)]
    pub start: String,

    #[serde(default)]
    pub end: String,
}

impl SeasonConfig {
    /// Returns `true` if both ends of the season are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }

    /// Parsed `(start, end)` dates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] if either date is missing and
    /// [`ConfigError::InvalidValue`] if a date does not parse or the season
    /// ends before it starts.
    pub fn bounds(&self) -> Result<(NaiveDate, NaiveDate), ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "season".to_string(),
            });
        }
        let start = parse_date("season.start", &self.start)?;
        let end = parse_date("season.end", &self.end)?;
        if end < start {
            return Err(ConfigError::InvalidValue {
                field: "season.end".to_string(),
                reason: format!("season ends ({end}) before it starts ({start})"),
            });
        }
        Ok((start, end))
    }
}

pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: format!("'{value}' is not a %Y-%m-%d date: {e}"),
    })
}
