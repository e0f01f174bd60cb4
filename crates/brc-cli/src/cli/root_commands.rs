use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Normalize, check, and flag a batch of count records.
    Check(CheckArgs),
    /// Print the active species reference tables.
    Reference(ReferenceArgs),
    /// Dump JSON schema for a record or report type.
    Schema(SchemaArgs),
}

/// Arguments for `brc check`.
#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    /// JSONL export of raw Trektellen rows
    pub input: PathBuf,

    /// JSONL file of count sessions (station, start, end)
    #[arg(long)]
    pub sessions: Option<PathBuf>,

    /// Where to write the flagged records (JSONL)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Check only this count day (YYYY-MM-DD)
    #[arg(long, conflicts_with = "all")]
    pub date: Option<NaiveDate>,

    /// Check every row, ignoring the configured season
    #[arg(long)]
    pub all: bool,

    /// Write one output file per station next to --output
    #[arg(long, requires = "output")]
    pub split_by_station: bool,

    /// Also write the normalized table before any flag was raised
    #[arg(long)]
    pub raw_output: Option<PathBuf>,
}

/// Arguments for `brc reference`.
#[derive(Clone, Debug, Args)]
pub struct ReferenceArgs {
    /// Print as TOML, ready to be edited into a reference file
    #[arg(long)]
    pub toml: bool,
}

/// Types `brc schema` can describe.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    RawRecord,
    CountRecord,
    CountSession,
    CheckReport,
    ReferenceData,
}

/// Arguments for `brc schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum)]
    pub type_name: SchemaType,
}
