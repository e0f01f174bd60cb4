//! Tunables for the window-based rule checks.

use serde::{Deserialize, Serialize};

const fn default_window_minutes() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChecksConfig {
    /// Half-width of the window in which aged tallies are reconciled with
    /// total counts, in minutes.
    #[serde(default = "default_window_minutes")]
    pub age_window_minutes: u32,

    /// Largest time gap between the two records of a doublecount pair, in minutes.
    #[serde(default = "default_window_minutes")]
    pub doublecount_window_minutes: u32,

    /// Optional TOML file replacing the built-in species reference tables.
    #[serde(default)]
    pub reference_path: String,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            age_window_minutes: default_window_minutes(),
            doublecount_window_minutes: default_window_minutes(),
            reference_path: String::new(),
        }
    }
}
