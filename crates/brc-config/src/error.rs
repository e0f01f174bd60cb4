//! Errors raised while loading or validating checker settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer (defaults, config file, `BRC_*` variable) failed to merge or
    /// extract.
    #[error("failed to load brc settings: {0}")]
    Figment(#[from] figment::Error),

    /// A section such as `[season]` is only half filled in.
    #[error("[{section}] is incomplete: set every field or none")]
    NotConfigured { section: String },

    /// A field such as `season.start` or `checks.doublecount_window_minutes`
    /// holds a value the checker cannot use.
    #[error("bad value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
