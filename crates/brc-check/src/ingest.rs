//! Turning raw Trektellen rows into a record table for one batch.
//!
//! Ingest never rejects a row. Unparseable dates and timestamps become
//! missing values that the normalizer and the missing-field check deal with.

use std::path::Path;

use brc_config::{BrcConfig, StationsConfig};
use brc_core::{CountRecord, CountSession, RawRecord, RecordId, RecordTable};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::DeserializeOwned;

use crate::error::CheckError;
use crate::reference::ReferenceData;

/// Which rows of an export make up the batch being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchSelection {
    /// Every row in the export.
    All,
    /// Rows from one count day.
    Date(NaiveDate),
    /// Rows from `start` through `end`, both inclusive.
    Season { start: NaiveDate, end: NaiveDate },
}

impl BatchSelection {
    /// The configured season, or [`BatchSelection::All`] when none is set.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Config`] if the season bounds are invalid.
    pub fn from_config(config: &BrcConfig) -> Result<Self, CheckError> {
        if !config.season.is_configured() {
            return Ok(Self::All);
        }
        let (start, end) = config.season.bounds()?;
        Ok(Self::Season { start, end })
    }

    /// Whether a row dated `date` belongs to the batch. Undated rows always do,
    /// so they reach the missing-field check instead of disappearing.
    #[must_use]
    pub fn includes(self, date: Option<NaiveDate>) -> bool {
        let Some(date) = date else {
            return true;
        };
        match self {
            Self::All => true,
            Self::Date(day) => date == day,
            Self::Season { start, end } => (start..=end).contains(&date),
        }
    }
}

const TIME_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    // Exports sometimes carry a midnight time after the date.
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
}

/// Convert one raw row. The id is a placeholder replaced by the table.
#[must_use]
pub fn convert(raw: RawRecord, stations: &StationsConfig, reference: &ReferenceData) -> CountRecord {
    let date = raw.date.as_deref().and_then(parse_date);
    let time = raw.timestamp.as_deref().and_then(parse_time);
    if raw.timestamp.is_some() && time.is_none() {
        tracing::warn!(timestamp = ?raw.timestamp, "unparseable timestamp treated as missing");
    }
    let datetime = date.zip(time).map(|(d, t)| NaiveDateTime::new(d, t));

    CountRecord {
        date,
        datetime,
        telpost: raw
            .telpost
            .as_deref()
            .map(|id| stations.resolve(id).to_string()),
        species_name: raw
            .speciesname
            .as_deref()
            .map(|species| reference.canonical_species(species).to_string()),
        count: raw.count,
        countback: raw.countback,
        local: raw.local,
        age: raw.age,
        sex: raw.sex,
        morph: raw.plumage,
        remark: raw.remark,
        location: raw.location,
        migtype: raw.migtype,
        count_type: raw.counttype,
        ..CountRecord::empty(RecordId(0))
    }
}

/// Build the batch table from raw rows, in export order.
#[must_use]
pub fn build_table(
    rows: Vec<RawRecord>,
    stations: &StationsConfig,
    reference: &ReferenceData,
    selection: BatchSelection,
) -> RecordTable {
    let total = rows.len();
    let mut table = RecordTable::new();
    for raw in rows {
        let record = convert(raw, stations, reference);
        if selection.includes(record.date) {
            table.push(record);
        }
    }
    tracing::info!(rows = total, selected = table.len(), ?selection, "ingested raw rows");
    table
}

/// Keep only the sessions whose count day belongs to the batch, so no
/// START/END row lands on a day the batch left out.
#[must_use]
pub fn select_sessions(sessions: Vec<CountSession>, selection: BatchSelection) -> Vec<CountSession> {
    let total = sessions.len();
    let selected: Vec<CountSession> = sessions
        .into_iter()
        .filter(|session| selection.includes(Some(session.date())))
        .collect();
    tracing::debug!(sessions = total, selected = selected.len(), "selected count sessions");
    selected
}

/// Read every line of a JSONL file as `T`.
///
/// # Errors
///
/// Returns [`CheckError::Read`] if the file cannot be opened or a line is not
/// valid JSON for `T`.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CheckError> {
    let read_error = |source: std::io::Error| CheckError::Read {
        path: path.to_path_buf(),
        source,
    };
    serde_jsonlines::json_lines(path)
        .map_err(read_error)?
        .collect::<std::io::Result<Vec<T>>>()
        .map_err(read_error)
}

/// Read count sessions, rejecting any that end before they start.
///
/// # Errors
///
/// Returns [`CheckError`] on unreadable files or inverted sessions.
pub fn read_sessions(path: &Path) -> Result<Vec<CountSession>, CheckError> {
    let sessions: Vec<CountSession> = read_jsonl(path)?;
    for session in &sessions {
        session.validate()?;
    }
    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(date: &str, timestamp: Option<&str>) -> RawRecord {
        RawRecord {
            date: Some(date.into()),
            timestamp: timestamp.map(str::to_string),
            telpost: Some("1047".into()),
            speciesname: Some("HB_AD".into()),
            count: Some(3),
            plumage: Some("D".into()),
            location: Some("W1".into()),
            ..RawRecord::default()
        }
    }

    #[test]
    fn convert_maps_station_species_and_morph() {
        let record = convert(
            raw("2019-09-01", Some("08:15:30.00")),
            &StationsConfig::default(),
            &ReferenceData::default(),
        );
        assert_eq!(record.telpost.as_deref(), Some("1. Sakhalvasho"));
        assert_eq!(record.species_name.as_deref(), Some("HB_NONJUV"));
        assert_eq!(record.morph.as_deref(), Some("D"));
        assert_eq!(
            record.datetime.unwrap().to_string(),
            "2019-09-01 08:15:30"
        );
    }

    #[test]
    fn bad_timestamp_leaves_datetime_missing() {
        let record = convert(
            raw("2019-09-01", Some("quarter past eight")),
            &StationsConfig::default(),
            &ReferenceData::default(),
        );
        assert!(record.datetime.is_none());
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2019, 9, 1));
    }

    #[test]
    fn date_selection_keeps_undated_rows() {
        let day = NaiveDate::from_ymd_opt(2019, 9, 1).unwrap();
        let rows = vec![
            raw("2019-09-01", Some("08:00")),
            raw("2019-09-02", Some("08:00")),
            RawRecord::default(),
        ];
        let table = build_table(
            rows,
            &StationsConfig::default(),
            &ReferenceData::default(),
            BatchSelection::Date(day),
        );
        assert_eq!(table.len(), 2);
        assert!(table.iter().any(|r| r.date.is_none()));
    }

    #[test]
    fn sessions_outside_the_batch_are_dropped() {
        let session = |day: u32| CountSession {
            telpost: "1. Sakhalvasho".into(),
            start: NaiveDate::from_ymd_opt(2019, 9, day)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap(),
            end: NaiveDate::from_ymd_opt(2019, 9, day)
                .unwrap()
                .and_hms_opt(11, 30, 0)
                .unwrap(),
        };
        let day = NaiveDate::from_ymd_opt(2019, 9, 1).unwrap();

        let kept = select_sessions(vec![session(1), session(2)], BatchSelection::Date(day));
        assert_eq!(kept, vec![session(1)]);

        let all = select_sessions(vec![session(1), session(2)], BatchSelection::All);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn season_selection_is_inclusive() {
        let selection = BatchSelection::Season {
            start: NaiveDate::from_ymd_opt(2019, 8, 15).unwrap(),
            end: NaiveDate::from_ymd_opt(2019, 10, 15).unwrap(),
        };
        assert!(selection.includes(NaiveDate::from_ymd_opt(2019, 8, 15)));
        assert!(selection.includes(NaiveDate::from_ymd_opt(2019, 10, 15)));
        assert!(!selection.includes(NaiveDate::from_ymd_opt(2019, 10, 16)));
    }
}
