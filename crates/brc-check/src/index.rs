//! Per-station, per-location time index for window lookups.
//!
//! Entries are kept sorted by `(datetime, id)`, so a ±window query is two
//! binary searches and ties between records at the same minute resolve by id.

use std::collections::HashMap;

use brc_core::{CountRecord, RecordId};
use chrono::{NaiveDateTime, TimeDelta};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub datetime: NaiveDateTime,
    pub id: RecordId,
    pub species: String,
    /// Positive count, or zero when the record has none.
    pub count: u32,
}

/// Sorted observation timelines keyed by `(station, location)`.
#[derive(Debug, Default)]
pub struct StationTimeline {
    lanes: HashMap<(String, String), Vec<TimelineEntry>>,
}

impl StationTimeline {
    /// Index the given records. Records without station, location, datetime,
    /// or species cannot be placed and are left out.
    pub fn build<'a>(records: impl IntoIterator<Item = &'a CountRecord>) -> Self {
        let mut lanes: HashMap<(String, String), Vec<TimelineEntry>> = HashMap::new();
        for record in records {
            let (Some(station), Some(location), Some(datetime), Some(species)) = (
                record.station(),
                record.location_code(),
                record.datetime,
                record.species(),
            ) else {
                continue;
            };
            lanes
                .entry((station.to_string(), location.to_string()))
                .or_default()
                .push(TimelineEntry {
                    datetime,
                    id: record.id,
                    species: species.to_string(),
                    count: record.positive_count().unwrap_or(0),
                });
        }
        for lane in lanes.values_mut() {
            lane.sort_by_key(|entry| (entry.datetime, entry.id));
        }
        Self { lanes }
    }

    /// Entries at `station`/`location` within `center ± half_width`, inclusive.
    #[must_use]
    pub fn window(
        &self,
        station: &str,
        location: &str,
        center: NaiveDateTime,
        half_width: TimeDelta,
    ) -> &[TimelineEntry] {
        let Some(lane) = self
            .lanes
            .get(&(station.to_string(), location.to_string()))
        else {
            return &[];
        };
        let from = center - half_width;
        let to = center + half_width;
        let lo = lane.partition_point(|entry| entry.datetime < from);
        let hi = lane.partition_point(|entry| entry.datetime <= to);
        &lane[lo..hi.max(lo)]
    }

    /// Sum of counts of `species` in a window slice.
    #[must_use]
    pub fn total_for(entries: &[TimelineEntry], mut species: impl FnMut(&str) -> bool) -> u64 {
        entries
            .iter()
            .filter(|entry| species(&entry.species))
            .map(|entry| u64::from(entry.count))
            .sum()
    }

    /// Number of indexed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}
