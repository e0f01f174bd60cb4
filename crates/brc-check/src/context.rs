//! Static inputs every rule check reads: reference tables, window lengths, and
//! the HB focus period.

use std::ops::RangeInclusive;
use std::path::Path;

use brc_config::BrcConfig;
use brc_core::CountRecord;
use chrono::{NaiveDateTime, TimeDelta};

use crate::error::CheckError;
use crate::reference::ReferenceData;

/// The configured focus period at one station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusPeriod {
    pub station: String,
    pub window: RangeInclusive<NaiveDateTime>,
}

impl FocusPeriod {
    /// Whether the record was taken at the focus station inside the window.
    /// `None` when the record lacks the station or datetime to decide.
    #[must_use]
    pub fn covers(&self, record: &CountRecord) -> Option<bool> {
        let station = record.station()?;
        let datetime = record.datetime?;
        Some(station == self.station && self.window.contains(&datetime))
    }
}

#[derive(Debug, Clone)]
pub struct CheckContext {
    pub reference: ReferenceData,
    pub focus: Option<FocusPeriod>,
    /// Half-width of the age-count reconciliation window.
    pub age_window: TimeDelta,
    /// Largest gap allowed inside a doublecount pair.
    pub doublecount_window: TimeDelta,
}

impl Default for CheckContext {
    fn default() -> Self {
        Self {
            reference: ReferenceData::default(),
            focus: None,
            age_window: TimeDelta::minutes(10),
            doublecount_window: TimeDelta::minutes(10),
        }
    }
}

impl CheckContext {
    /// Build a context from loaded configuration.
    ///
    /// Reference tables come from `checks.reference_path` when set, otherwise
    /// the built-in defaults are used.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError`] if the focus window is invalid or the reference
    /// file cannot be loaded.
    pub fn from_config(config: &BrcConfig) -> Result<Self, CheckError> {
        let reference = if config.checks.reference_path.is_empty() {
            ReferenceData::default()
        } else {
            ReferenceData::from_toml_file(Path::new(&config.checks.reference_path))?
        };

        let focus = config.focus.window()?.map(|window| FocusPeriod {
            station: config.focus.station.clone(),
            window,
        });
        if focus.is_none() {
            tracing::info!("HB focus period not configured; single-count heuristic disabled");
        }

        Ok(Self {
            reference,
            focus,
            age_window: TimeDelta::minutes(i64::from(config.checks.age_window_minutes)),
            doublecount_window: TimeDelta::minutes(i64::from(
                config.checks.doublecount_window_minutes,
            )),
        })
    }

    /// Set the focus period, replacing any configured one.
    #[must_use]
    pub fn with_focus(mut self, station: &str, window: RangeInclusive<NaiveDateTime>) -> Self {
        self.focus = Some(FocusPeriod {
            station: station.to_string(),
            window,
        });
        self
    }
}
