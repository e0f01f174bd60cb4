//! Doublecount pairing.
//!
//! A flock marked `D` was counted at both stations and must appear twice: once
//! per station, close in time, with the same identification and numbers, and
//! at locations that cover the same airspace. Candidates are walked in time
//! order; a valid pair consumes both records, anything else flags the earlier
//! record and lets the later one look for its own partner.

use brc_core::{CountRecord, Flag, RecordTable};

use super::{Rule, RuleHit};
use crate::context::CheckContext;

pub struct Doublecount;

impl Rule for Doublecount {
    fn name(&self) -> &'static str {
        "doublecount"
    }

    fn check(&self, table: &RecordTable, ctx: &CheckContext) -> Vec<RuleHit> {
        let mut hits = Vec::new();
        let mut candidates: Vec<&CountRecord> = Vec::new();
        for record in table.observations().filter(|r| r.is_double_count()) {
            let placeable = record.datetime.is_some()
                && record.station().is_some()
                && record.location_code().is_some();
            if placeable {
                candidates.push(record);
            } else {
                hits.push(RuleHit::missing(record.id));
            }
        }
        candidates.sort_by(|a, b| {
            (a.datetime, a.station(), a.id).cmp(&(b.datetime, b.station(), b.id))
        });

        let mut i = 0;
        while i < candidates.len() {
            let first = candidates[i];
            if let Some(second) = candidates.get(i + 1) {
                if is_pair(first, second, ctx) {
                    i += 2;
                    continue;
                }
            }
            hits.push(RuleHit::new(first.id, Flag::ErroneousDoublecount));
            i += 1;
        }
        hits
    }
}

fn same_when_given(first: Option<&str>, second: Option<&str>) -> bool {
    first.is_none() || first == second
}

fn is_pair(a: &CountRecord, b: &CountRecord, ctx: &CheckContext) -> bool {
    let (Some(a_time), Some(b_time)) = (a.datetime, b.datetime) else {
        return false;
    };
    let (Some(a_station), Some(b_station)) = (a.station(), b.station()) else {
        return false;
    };
    let (Some(own), Some(other)) = (a.distance(), b.distance()) else {
        return false;
    };

    (b_time - a_time).abs() <= ctx.doublecount_window
        && a.species().is_some()
        && a.species() == b.species()
        && same_when_given(a.age_code(), b.age_code())
        && same_when_given(a.sex_code(), b.sex_code())
        && a.count == b.count
        && a.countback == b.countback
        && a_station != b_station
        && ctx.reference.overlaps(a_station, own.as_str(), other) == Some(true)
}
