//! Errors raised at the edges of a check run.
//!
//! Rule checks never fail on record contents. These variants cover the
//! surrounding plumbing: unreadable input files, reference tables that do not
//! parse, and configuration that cannot be turned into a check context.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    /// A JSONL file could not be read or a line is not valid JSON for its type.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSONL output file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The reference-data TOML file is malformed.
    #[error("Invalid reference data in {path}: {source}")]
    Reference {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Config(#[from] brc_config::ConfigError),

    #[error(transparent)]
    Core(#[from] brc_core::CoreError),
}
