use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `brc` binary.
#[derive(Debug, Parser)]
#[command(
    name = "brc",
    version,
    about = "Batumi Raptor Count - flag suspect records in Trektellen exports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no report once output is written)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra config file layered above the discovered ones
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::NaiveDate;
    use clap::{CommandFactory, Parser};

    use super::root_commands::SchemaType;
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "brc",
            "--format",
            "table",
            "--verbose",
            "check",
            "export.jsonl",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["brc", "reference", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Reference(_)));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["brc", "--format", "xml", "reference"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn check_args_parse() {
        let cli = Cli::try_parse_from([
            "brc",
            "check",
            "export.jsonl",
            "--sessions",
            "sessions.jsonl",
            "--output",
            "out/checked.jsonl",
            "--date",
            "2019-09-01",
            "--split-by-station",
            "--raw-output",
            "out/raw.jsonl",
        ])
        .expect("cli should parse");

        let Commands::Check(args) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(args.input, Path::new("export.jsonl"));
        assert_eq!(args.sessions.as_deref(), Some(Path::new("sessions.jsonl")));
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2019, 9, 1));
        assert!(args.split_by_station);
        assert_eq!(args.raw_output.as_deref(), Some(Path::new("out/raw.jsonl")));
    }

    #[test]
    fn date_and_all_conflict() {
        let parsed = Cli::try_parse_from([
            "brc",
            "check",
            "export.jsonl",
            "--date",
            "2019-09-01",
            "--all",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn schema_type_is_validated() {
        let cli = Cli::try_parse_from(["brc", "schema", "count-record"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Schema(ref args) if args.type_name == SchemaType::CountRecord
        ));
        assert!(Cli::try_parse_from(["brc", "schema", "finding"]).is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["brc", "--config", "/tmp/brc.toml", "reference"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.config.as_deref(), Some(Path::new("/tmp/brc.toml")));
    }
}
