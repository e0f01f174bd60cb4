//! Honey Buzzard focus period.
//!
//! During peak Honey Buzzard passage, Station 2 is expected to single-count
//! HB. Records there that are not marked single-count get flagged, and their
//! aged tallies are left out of age-count reconciliation.

use std::ops::RangeInclusive;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_station() -> String {
    "2. Shuamta".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FocusConfig {
    /// Start of the HB focus period (`%Y-%m-%d %H:%M:%S`, or a date for midnight).
    #[serde(default)]
    pub hb_start: String,

    /// End of the HB focus period, inclusive.
    #[serde(default)]
    pub hb_end: String,

    /// Station the focus period applies to.
    #[serde(default = "default_station")]
    pub station: String,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            hb_start: String::new(),
            hb_end: String::new(),
            station: default_station(),
        }
    }
}

impl FocusConfig {
    /// Returns `true` if both ends of the focus period are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.hb_start.is_empty() && !self.hb_end.is_empty()
    }

    /// The inclusive focus window, or `None` when not configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a bound does not parse or the
    /// window is inverted.
    pub fn window(&self) -> Result<Option<RangeInclusive<NaiveDateTime>>, ConfigError> {
        if !self.is_configured() {
            return Ok(None);
        }
        let start = parse_datetime("focus.hb_start", &self.hb_start)?;
        let end = parse_datetime("focus.hb_end", &self.hb_end)?;
        if end < start {
            return Err(ConfigError::InvalidValue {
                field: "focus.hb_end".to_string(),
                reason: format!("focus period ends ({end}) before it starts ({start})"),
            });
        }
        Ok(Some(start..=end))
    }
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

pub(crate) fn parse_datetime(field: &str, value: &str) -> Result<NaiveDateTime, ConfigError> {
    let trimmed = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("'{value}' is not a date or date-time"),
        })
}
