//! Count records: the raw Trektellen row, the checked record, and the count
//! session metadata used to place START/END boundaries.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::distance::DistanceCode;
use crate::enums::RecordKind;
use crate::errors::CoreError;
use crate::flags::Flags;

/// Count type code for single-counted flocks.
pub const SINGLE_COUNT: &str = "S";
/// Count type code for flocks counted at both stations.
pub const DOUBLE_COUNT: &str = "D";

/// Stable identifier of a record within one batch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rec-{:06}", self.0)
    }
}

// ---------------------------------------------------------------------------
// RawRecord
// ---------------------------------------------------------------------------

/// One row of the Trektellen export, exactly as the fetch layer hands it over.
///
/// Every field is optional and lenient: numbers written as strings are
/// accepted, and values that cannot be read become `None` so the checker can
/// flag them instead of rejecting the batch. Columns not listed here
/// (`countid`, `speciesid`, `year`, `yday`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RawRecord {
    /// Count date, `%Y-%m-%d`.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[schemars(with = "Option<String>")]
    pub date: Option<String>,

    /// Time of observation, `%H:%M:%S` with optional fraction.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[schemars(with = "Option<String>")]
    pub timestamp: Option<String>,

    /// Numeric Trektellen station id (e.g. `1047`).
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[schemars(with = "Option<String>")]
    pub telpost: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[schemars(with = "Option<String>")]
    pub speciesname: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_u32")]
    #[schemars(with = "Option<u32>")]
    pub count: Option<u32>,

    #[serde(default, deserialize_with = "lenient::opt_u32")]
    #[schemars(with = "Option<u32>")]
    pub countback: Option<u32>,

    #[serde(default, deserialize_with = "lenient::opt_u32")]
    #[schemars(with = "Option<u32>")]
    pub local: Option<u32>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[schemars(with = "Option<String>")]
    pub age: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[schemars(with = "Option<String>")]
    pub sex: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[schemars(with = "Option<String>")]
    pub plumage: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[schemars(with = "Option<String>")]
    pub remark: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[schemars(with = "Option<String>")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[schemars(with = "Option<String>")]
    pub migtype: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[schemars(with = "Option<String>")]
    pub counttype: Option<String>,
}

// ---------------------------------------------------------------------------
// CountRecord
// ---------------------------------------------------------------------------

/// A count record inside the checker, and the row shape written back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CountRecord {
    pub id: RecordId,
    #[serde(default)]
    pub kind: RecordKind,
    pub date: Option<NaiveDate>,
    pub datetime: Option<NaiveDateTime>,
    pub telpost: Option<String>,
    pub species_name: Option<String>,
    pub count: Option<u32>,
    pub countback: Option<u32>,
    pub local: Option<u32>,
    pub age: Option<String>,
    pub sex: Option<String>,
    pub morph: Option<String>,
    pub remark: Option<String>,
    pub location: Option<String>,
    pub migtype: Option<String>,
    pub count_type: Option<String>,
    #[serde(default)]
    pub flags: Flags,
}

impl CountRecord {
    /// An observation with every field empty. Mostly useful as a base for
    /// struct update syntax.
    #[must_use]
    pub fn empty(id: RecordId) -> Self {
        Self {
            id,
            kind: RecordKind::Observation,
            date: None,
            datetime: None,
            telpost: None,
            species_name: None,
            count: None,
            countback: None,
            local: None,
            age: None,
            sex: None,
            morph: None,
            remark: None,
            location: None,
            migtype: None,
            count_type: None,
            flags: Flags::new(),
        }
    }

    /// A synthetic START/END row for a count session.
    ///
    /// Boundary rows carry the structural fields (station, time, a count of
    /// one at `O`) so they never look incomplete, and no biological payload.
    #[must_use]
    pub fn boundary(
        id: RecordId,
        kind: RecordKind,
        telpost: &str,
        datetime: NaiveDateTime,
    ) -> Self {
        Self {
            kind,
            date: Some(datetime.date()),
            datetime: Some(datetime),
            telpost: Some(telpost.to_string()),
            species_name: kind.boundary_label().map(str::to_string),
            count: Some(1),
            countback: Some(0),
            local: Some(0),
            location: Some(DistanceCode::O.as_str().to_string()),
            ..Self::empty(id)
        }
    }

    #[must_use]
    pub const fn is_observation(&self) -> bool {
        !self.kind.is_boundary()
    }

    #[must_use]
    pub fn species(&self) -> Option<&str> {
        non_blank(self.species_name.as_deref())
    }

    #[must_use]
    pub fn station(&self) -> Option<&str> {
        non_blank(self.telpost.as_deref())
    }

    #[must_use]
    pub fn age_code(&self) -> Option<&str> {
        non_blank(self.age.as_deref())
    }

    #[must_use]
    pub fn sex_code(&self) -> Option<&str> {
        non_blank(self.sex.as_deref())
    }

    #[must_use]
    pub fn morph_code(&self) -> Option<&str> {
        non_blank(self.morph.as_deref())
    }

    /// Raw location text, if any was entered.
    #[must_use]
    pub fn location_code(&self) -> Option<&str> {
        non_blank(self.location.as_deref())
    }

    /// Location on the distance scale. `None` when absent or not a known code.
    #[must_use]
    pub fn distance(&self) -> Option<DistanceCode> {
        self.location_code().and_then(DistanceCode::parse)
    }

    #[must_use]
    pub fn is_single_count(&self) -> bool {
        non_blank(self.count_type.as_deref()) == Some(SINGLE_COUNT)
    }

    #[must_use]
    pub fn is_double_count(&self) -> bool {
        non_blank(self.count_type.as_deref()) == Some(DOUBLE_COUNT)
    }

    /// Number of injured or killed birds. Set only when the record carries a
    /// migration type marker, in which case `count` is the casualty count.
    #[must_use]
    pub fn injured_killed_count(&self) -> Option<u32> {
        non_blank(self.migtype.as_deref()).and(self.count)
    }

    /// A positive count; zero is treated as no count at all.
    #[must_use]
    pub fn positive_count(&self) -> Option<u32> {
        self.count.filter(|count| *count > 0)
    }

    #[must_use]
    pub fn time_of_day(&self) -> Option<NaiveTime> {
        self.datetime.map(|dt| dt.time())
    }

    /// Names of the essential columns that are absent or blank.
    #[must_use]
    pub fn missing_essential_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.datetime.is_none() {
            missing.push("datetime");
        }
        if self.station().is_none() {
            missing.push("telpost");
        }
        if self.species().is_none() {
            missing.push("species_name");
        }
        if self.positive_count().is_none() {
            missing.push("count");
        }
        if self.location_code().is_none() {
            missing.push("location");
        }
        missing
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// CountSession
// ---------------------------------------------------------------------------

/// Registered start and end of a count day at one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CountSession {
    /// Station name as it appears in `CountRecord::telpost`.
    pub telpost: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl CountSession {
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Reject sessions that end before they start.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvertedSession`] when `end < start`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.end < self.start {
            return Err(CoreError::InvertedSession {
                telpost: self.telpost.clone(),
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Lenient field readers
// ---------------------------------------------------------------------------

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().and_then(whole_number))
                .and_then(|n| u32::try_from(n).ok()),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                trimmed.parse::<u32>().ok().or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .and_then(whole_number)
                        .and_then(|n| u32::try_from(n).ok())
                })
            }
            _ => None,
        })
    }

    /// Spreadsheet exports write integer columns with gaps as floats (`3.0`).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn whole_number(f: f64) -> Option<u64> {
        (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX))
            .then_some(f as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 9, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn raw_record_reads_mixed_types() {
        let json = r#"{"date":"2019-09-01","timestamp":"08:15:00","telpost":1047,"speciesname":"HB","count":"12","countback":0.0,"local":null,"age":"","location":"W1","countid":99}"#;
        let raw: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(raw.telpost.as_deref(), Some("1047"));
        assert_eq!(raw.count, Some(12));
        assert_eq!(raw.countback, Some(0));
        assert_eq!(raw.local, None);
        assert_eq!(raw.age, None);
        assert_eq!(raw.plumage, None);
    }

    #[test]
    fn raw_record_turns_garbage_numbers_into_none() {
        let raw: RawRecord = serde_json::from_str(r#"{"count":"many","countback":-3}"#).unwrap();
        assert_eq!(raw.count, None);
        assert_eq!(raw.countback, None);
    }

    #[test]
    fn boundary_records_look_complete() {
        let start = CountRecord::boundary(RecordId(7), RecordKind::SessionStart, "2. Shuamta", at(6, 0));
        assert!(!start.is_observation());
        assert_eq!(start.species(), Some("START"));
        assert!(start.missing_essential_fields().is_empty());
        assert!(start.flags.is_empty());
    }

    #[test]
    fn missing_fields_lists_zero_count() {
        let record = CountRecord {
            datetime: Some(at(9, 0)),
            telpost: Some("1. Sakhalvasho".into()),
            species_name: Some("HB".into()),
            count: Some(0),
            location: Some(" ".into()),
            ..CountRecord::empty(RecordId(1))
        };
        assert_eq!(record.missing_essential_fields(), vec!["count", "location"]);
    }

    #[test]
    fn injured_count_requires_migtype() {
        let mut record = CountRecord {
            count: Some(3),
            ..CountRecord::empty(RecordId(1))
        };
        assert_eq!(record.injured_killed_count(), None);
        record.migtype = Some("K".into());
        assert_eq!(record.injured_killed_count(), Some(3));
    }

    #[test]
    fn inverted_session_is_rejected() {
        let session = CountSession {
            telpost: "1. Sakhalvasho".into(),
            start: at(11, 30),
            end: at(6, 0),
        };
        assert!(matches!(
            session.validate(),
            Err(CoreError::InvertedSession { .. })
        ));
    }

    #[test]
    fn record_id_display_is_padded() {
        assert_eq!(RecordId(42).to_string(), "rec-000042");
    }
}
