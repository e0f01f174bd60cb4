//! The in-memory record table a batch is checked in.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::enums::RecordKind;
use crate::record::{CountRecord, RecordId};

/// Ordered collection of count records with batch-unique ids.
///
/// Rows are only ever added; nothing in the checker removes a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTable {
    records: Vec<CountRecord>,
    next_id: u64,
}

impl RecordTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap records that already carry ids (e.g. a previously checked batch).
    #[must_use]
    pub fn from_records(records: Vec<CountRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id.0 + 1).max().unwrap_or(0);
        Self { records, next_id }
    }

    /// Reserve the next free id.
    pub fn allocate_id(&mut self) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a record, replacing its id with a fresh one.
    pub fn push(&mut self, mut record: CountRecord) -> RecordId {
        let id = self.allocate_id();
        record.id = id;
        self.records.push(record);
        id
    }

    /// Append a START/END row for `telpost` at `datetime`.
    pub fn push_boundary(
        &mut self,
        kind: RecordKind,
        telpost: &str,
        datetime: NaiveDateTime,
    ) -> RecordId {
        let id = self.allocate_id();
        self.records
            .push(CountRecord::boundary(id, kind, telpost, datetime));
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[CountRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CountRecord> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, CountRecord> {
        self.records.iter_mut()
    }

    /// Real observations only, skipping START/END rows.
    pub fn observations(&self) -> impl Iterator<Item = &CountRecord> {
        self.records.iter().filter(|r| r.is_observation())
    }

    /// Linear lookup by id.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&CountRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Map from record id to its current row position.
    #[must_use]
    pub fn position_index(&self) -> HashMap<RecordId, usize> {
        self.records
            .iter()
            .enumerate()
            .map(|(pos, r)| (r.id, pos))
            .collect()
    }

    /// Mutable row access by position, as returned from [`Self::position_index`].
    pub fn get_mut_at(&mut self, position: usize) -> Option<&mut CountRecord> {
        self.records.get_mut(position)
    }

    /// Whether a boundary row of `kind` already exists for the station and time.
    #[must_use]
    pub fn has_boundary(&self, kind: RecordKind, telpost: &str, datetime: NaiveDateTime) -> bool {
        self.records.iter().any(|r| {
            r.kind == kind && r.datetime == Some(datetime) && r.station() == Some(telpost)
        })
    }

    /// Stable sort by `(datetime, telpost)`. Rows without a datetime go last
    /// and keep their relative order.
    pub fn sort_chronologically(&mut self) {
        self.records.sort_by(|a, b| {
            let key_a = (a.datetime.is_none(), a.datetime, a.telpost.as_deref());
            let key_b = (b.datetime.is_none(), b.datetime, b.telpost.as_deref());
            key_a.cmp(&key_b)
        });
    }

    /// Rows grouped by station name, in table order. Rows without a station
    /// are grouped under the empty string.
    #[must_use]
    pub fn split_by_station(&self) -> Vec<(String, Vec<&CountRecord>)> {
        let mut groups: Vec<(String, Vec<&CountRecord>)> = Vec::new();
        for record in &self.records {
            let station = record.station().unwrap_or_default();
            match groups.iter_mut().find(|(name, _)| name == station) {
                Some((_, rows)) => rows.push(record),
                None => groups.push((station.to_string(), vec![record])),
            }
        }
        groups.sort_by(|a, b| a.0.cmp(&b.0));
        groups
    }
}

impl<'a> IntoIterator for &'a RecordTable {
    type Item = &'a CountRecord;
    type IntoIter = std::slice::Iter<'a, CountRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 9, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn observation(telpost: &str, datetime: Option<NaiveDateTime>) -> CountRecord {
        CountRecord {
            telpost: Some(telpost.to_string()),
            datetime,
            ..CountRecord::empty(RecordId(0))
        }
    }

    #[test]
    fn push_assigns_sequential_ids() {
        let mut table = RecordTable::new();
        let a = table.push(observation("1. Sakhalvasho", None));
        let b = table.push(observation("1. Sakhalvasho", None));
        assert_eq!(a, RecordId(0));
        assert_eq!(b, RecordId(1));
    }

    #[test]
    fn from_records_continues_after_highest_id() {
        let mut record = observation("2. Shuamta", None);
        record.id = RecordId(41);
        let mut table = RecordTable::from_records(vec![record]);
        assert_eq!(table.allocate_id(), RecordId(42));
    }

    #[test]
    fn sort_puts_undated_rows_last() {
        let mut table = RecordTable::new();
        let undated = table.push(observation("1. Sakhalvasho", None));
        let late = table.push(observation("1. Sakhalvasho", Some(at(10, 0))));
        let early = table.push(observation("2. Shuamta", Some(at(7, 0))));
        table.sort_chronologically();
        let order: Vec<_> = table.iter().map(|r| r.id).collect();
        assert_eq!(order, vec![early, late, undated]);
    }

    #[test]
    fn split_groups_by_station_name() {
        let mut table = RecordTable::new();
        table.push(observation("2. Shuamta", Some(at(7, 0))));
        table.push(observation("1. Sakhalvasho", Some(at(8, 0))));
        table.push(observation("2. Shuamta", Some(at(9, 0))));
        let groups = table.split_by_station();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "1. Sakhalvasho");
        assert_eq!(groups[1].1.len(), 2);
    }
}
