use std::path::Path;

use anyhow::Context;
use brc_check::ingest::{build_table, read_jsonl, read_sessions, select_sessions};
use brc_check::normalize::normalize;
use brc_check::writer::{write_checked, write_split_by_station};
use brc_check::{BatchSelection, CheckContext, Checker};
use brc_config::BrcConfig;
use brc_core::{RawRecord, RecordTable};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CheckArgs;
use crate::output::output;

/// Handle `brc check`.
pub fn handle(args: &CheckArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = BrcConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load brc configuration")?;
    let ctx = CheckContext::from_config(&config).context("failed to prepare checks")?;
    let selection = selection(args, &config)?;

    let rows: Vec<RawRecord> = read_jsonl(&args.input)
        .with_context(|| format!("failed to read export {}", args.input.display()))?;
    let mut table = build_table(rows, &config.stations, &ctx.reference, selection);

    let sessions = match &args.sessions {
        Some(path) => select_sessions(
            read_sessions(path)
                .with_context(|| format!("failed to read sessions {}", path.display()))?,
            selection,
        ),
        None => Vec::new(),
    };

    let normalized = normalize(&mut table, &sessions);
    if let Some(path) = &args.raw_output {
        write_table(path, &table, args.split_by_station)?;
    }

    let report = Checker::new(ctx).flag(&mut table, normalized);

    if let Some(path) = &args.output {
        write_table(path, &table, args.split_by_station)?;
        if flags.quiet {
            return Ok(());
        }
    }

    output(&report, flags.format)
}

fn selection(args: &CheckArgs, config: &BrcConfig) -> anyhow::Result<BatchSelection> {
    if let Some(date) = args.date {
        return Ok(BatchSelection::Date(date));
    }
    if args.all {
        return Ok(BatchSelection::All);
    }
    BatchSelection::from_config(config).context("invalid season in configuration")
}

fn write_table(path: &Path, table: &RecordTable, split: bool) -> anyhow::Result<()> {
    if split {
        let written = write_split_by_station(path, table)
            .with_context(|| format!("failed to write station files for {}", path.display()))?;
        tracing::info!(files = written.len(), "wrote per-station output");
    } else {
        write_checked(path, table)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}
