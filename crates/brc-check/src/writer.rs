//! JSONL output of a checked table.
//!
//! Each line is the full record plus a `check` column holding the flag labels
//! coordinators read in the review sheet.

use std::path::{Path, PathBuf};

use brc_core::{CountRecord, RecordTable};
use serde::Serialize;

use crate::error::CheckError;

/// Suffix used for rows that have no station.
pub const UNASSIGNED_STATION: &str = "unassigned";

#[derive(Debug, Serialize)]
pub struct OutputRow<'a> {
    #[serde(flatten)]
    pub record: &'a CountRecord,
    pub check: String,
}

impl<'a> From<&'a CountRecord> for OutputRow<'a> {
    fn from(record: &'a CountRecord) -> Self {
        Self {
            record,
            check: record.flags.labels(),
        }
    }
}

fn write_rows<'a>(
    path: &Path,
    rows: impl IntoIterator<Item = &'a CountRecord>,
) -> Result<(), CheckError> {
    let write_error = |source: std::io::Error| CheckError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    serde_jsonlines::write_json_lines(path, rows.into_iter().map(OutputRow::from))
        .map_err(write_error)
}

/// Write the whole table to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`CheckError::Write`] if the file cannot be written.
pub fn write_checked(path: &Path, table: &RecordTable) -> Result<(), CheckError> {
    write_rows(path, table)?;
    tracing::debug!(path = %path.display(), rows = table.len(), "wrote checked table");
    Ok(())
}

/// Short file suffix for a station: `1. Sakhalvasho` becomes `S1`.
#[must_use]
pub fn station_suffix(station: &str) -> String {
    if station.is_empty() {
        return UNASSIGNED_STATION.to_string();
    }
    let number: String = station.chars().take_while(char::is_ascii_digit).collect();
    if number.is_empty() {
        station
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    } else {
        format!("S{number}")
    }
}

/// Path of the per-station file next to `path`: `out.jsonl` becomes
/// `out_S1.jsonl`.
#[must_use]
pub fn station_path(path: &Path, station: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map_or_else(|| "output".into(), |s| s.to_string_lossy());
    let extension = path
        .extension()
        .map_or_else(|| "jsonl".into(), |e| e.to_string_lossy());
    path.with_file_name(format!("{stem}_{}.{extension}", station_suffix(station)))
}

/// Write one file per station next to `path` and return the paths written.
///
/// # Errors
///
/// Returns [`CheckError::Write`] if any file cannot be written.
pub fn write_split_by_station(path: &Path, table: &RecordTable) -> Result<Vec<PathBuf>, CheckError> {
    let mut written = Vec::new();
    for (station, rows) in table.split_by_station() {
        let target = station_path(path, &station);
        write_rows(&target, rows.iter().copied())?;
        tracing::debug!(path = %target.display(), rows = rows.len(), %station, "wrote station file");
        written.push(target);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brc_core::{Flag, RecordId};
    use pretty_assertions::assert_eq;

    #[test]
    fn row_carries_check_labels() {
        let mut record = CountRecord::empty(RecordId(3));
        record.flags.insert(Flag::MissingEssentialFields);
        record.flags.insert(Flag::UnexpectedMorph);
        let value = serde_json::to_value(OutputRow::from(&record)).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(
            value["check"],
            "unexpected morph, gaps in essential columns"
        );
        assert_eq!(
            value["flags"],
            serde_json::json!(["unexpected_morph", "missing_essential_fields"])
        );
    }

    #[test]
    fn station_suffixes() {
        assert_eq!(station_suffix("1. Sakhalvasho"), "S1");
        assert_eq!(station_suffix("2. Shuamta"), "S2");
        assert_eq!(station_suffix("1049"), "S1049");
        assert_eq!(station_suffix("Hilltop"), "Hilltop");
        assert_eq!(station_suffix(""), "unassigned");
    }

    #[test]
    fn station_path_keeps_directory_and_extension() {
        assert_eq!(
            station_path(Path::new("out/batch.jsonl"), "2. Shuamta"),
            PathBuf::from("out/batch_S2.jsonl")
        );
    }
}
