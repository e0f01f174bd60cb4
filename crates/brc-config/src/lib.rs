//! # brc-config
//!
//! Layered configuration loading for the BRC checker using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`BRC_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.brc/config.toml`
//! 4. User-level `~/.config/brc/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `BRC_FOCUS__HB_START` -> `focus.hb_start`,
//! `BRC_CHECKS__AGE_WINDOW_MINUTES` -> `checks.age_window_minutes`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use brc_config::BrcConfig;
//!
//! let config = BrcConfig::load_with_dotenv(None).expect("config");
//! if let Some(window) = config.focus.window().expect("valid focus window") {
//!     println!("HB focus period: {} .. {}", window.start(), window.end());
//! }
//! ```

mod checks;
mod error;
mod focus;
mod season;
mod stations;

pub use checks::ChecksConfig;
pub use error::ConfigError;
pub use focus::FocusConfig;
pub use season::SeasonConfig;
pub use stations::StationsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BrcConfig {
    #[serde(default)]
    pub season: SeasonConfig,
    #[serde(default)]
    pub focus: FocusConfig,
    #[serde(default)]
    pub checks: ChecksConfig,
    #[serde(default)]
    pub stations: StationsConfig,
}

impl BrcConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering `explicit` above the discovered TOML files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load_from(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support, layering `explicit` as
    /// in [`Self::load_from`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load_from(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".brc/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("BRC_").split("__"));

        figment
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for zero-length windows, an
    /// inverted focus period, or an inverted season.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.checks.age_window_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "checks.age_window_minutes".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.checks.doublecount_window_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "checks.doublecount_window_minutes".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        self.focus.window()?;
        if self.season.is_configured() {
            self.season.bounds()?;
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("brc").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
