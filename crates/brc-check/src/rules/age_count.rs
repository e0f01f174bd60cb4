//! Aged tallies reconciled against the total count around them.
//!
//! Observers count a total (`HB`) and, for the birds they manage to age,
//! separate tallies (`HB_JUV`, `HB_NONJUV`). Within ±`age_window` at the same
//! station and location, more aged birds than counted birds means one of the
//! numbers is wrong.

use brc_core::{CountRecord, Flag, RecordTable};

use super::{Rule, RuleHit};
use crate::context::CheckContext;
use crate::index::StationTimeline;
use crate::reference::AgedTally;

pub struct AgeCount;

impl Rule for AgeCount {
    fn name(&self) -> &'static str {
        "age_count"
    }

    fn check(&self, table: &RecordTable, ctx: &CheckContext) -> Vec<RuleHit> {
        let mut hits = Vec::new();
        for tally in &ctx.reference.aged_tallies {
            check_tally(tally, table, ctx, &mut hits);
        }
        hits
    }
}

fn in_tally(tally: &AgedTally, species: &str) -> bool {
    species == tally.total || is_aged(tally, species)
}

fn is_aged(tally: &AgedTally, species: &str) -> bool {
    tally.aged.iter().any(|aged| aged == species)
}

/// Aged records taken in the focus period without a single count are left
/// alone: the focus station ages a sample, not the whole passage.
fn exempt(tally: &AgedTally, record: &CountRecord, ctx: &CheckContext) -> bool {
    tally.focus_exempt
        && !record.is_single_count()
        && ctx
            .focus
            .as_ref()
            .is_some_and(|focus| focus.covers(record) == Some(true))
}

fn check_tally(tally: &AgedTally, table: &RecordTable, ctx: &CheckContext, hits: &mut Vec<RuleHit>) {
    let timeline = StationTimeline::build(
        table
            .observations()
            .filter(|record| record.species().is_some_and(|s| in_tally(tally, s))),
    );

    for record in table.observations() {
        if !record.species().is_some_and(|s| is_aged(tally, s)) || exempt(tally, record, ctx) {
            continue;
        }
        let (Some(station), Some(location), Some(datetime)) =
            (record.station(), record.location_code(), record.datetime)
        else {
            hits.push(RuleHit::missing(record.id));
            continue;
        };

        let window = timeline.window(station, location, datetime, ctx.age_window);
        let total = StationTimeline::total_for(window, |s| s == tally.total);
        let aged = StationTimeline::total_for(window, |s| is_aged(tally, s));
        if aged > total {
            tracing::trace!(id = %record.id, total, aged, species = %tally.total, "aged exceeds total");
            hits.push(RuleHit::new(record.id, Flag::AgeCountMismatch));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::{S2, at, hit_ids, hit_ids_with, hits, obs, table};
    use brc_core::RecordId;

    fn tally(species: &str, count: u32, location: &str, h: u32, m: u32) -> CountRecord {
        CountRecord {
            location: Some(location.into()),
            datetime: Some(at(h, m)),
            ..obs(species, count)
        }
    }

    #[test]
    fn aged_within_total_passes() {
        let table = table(vec![
            tally("HB", 100, "O", 9, 0),
            tally("HB_JUV", 30, "O", 9, 5),
            tally("HB_NONJUV", 60, "O", 9, 8),
        ]);
        assert!(hit_ids(&AgeCount, &table).is_empty());
    }

    #[test]
    fn aged_exceeding_total_flags_aged_records() {
        let table = table(vec![
            tally("HB", 10, "O", 9, 0),
            tally("HB_JUV", 8, "O", 9, 5),
            tally("HB_NONJUV", 8, "O", 9, 8),
        ]);
        assert_eq!(hit_ids(&AgeCount, &table), vec![1, 2]);
    }

    #[test]
    fn total_outside_window_does_not_count() {
        let table = table(vec![
            tally("BK", 50, "O", 8, 40),
            tally("BK_JUV", 5, "O", 9, 0),
        ]);
        assert_eq!(hit_ids(&AgeCount, &table), vec![1]);
    }

    #[test]
    fn total_at_other_location_does_not_count() {
        let table = table(vec![
            tally("BK", 50, "E1", 9, 0),
            tally("BK_NONJUV", 5, "O", 9, 0),
        ]);
        assert_eq!(hit_ids(&AgeCount, &table), vec![1]);
    }

    #[test]
    fn tallies_do_not_mix_species() {
        let table = table(vec![
            tally("HB", 50, "O", 9, 0),
            tally("BK_JUV", 5, "O", 9, 0),
        ]);
        assert_eq!(hit_ids(&AgeCount, &table), vec![1]);
    }

    #[test]
    fn focus_period_exempts_unmarked_hb_tallies() {
        let station2 = |species: &str, count_type: Option<&str>| CountRecord {
            telpost: Some(S2.into()),
            count_type: count_type.map(str::to_string),
            ..tally(species, 5, "O", 9, 0)
        };
        let table = table(vec![
            station2("HB_JUV", None),
            station2("HB_JUV", Some("S")),
            station2("BK_JUV", None),
        ]);
        let ctx = CheckContext::default().with_focus(S2, at(8, 0)..=at(12, 0));
        assert_eq!(hit_ids_with(&AgeCount, &table, &ctx), vec![1, 2]);
    }

    #[test]
    fn unplaceable_aged_record_gets_missing_flag() {
        let table = table(vec![CountRecord {
            location: None,
            ..tally("HB_JUV", 5, "O", 9, 0)
        }]);
        assert_eq!(hits(&AgeCount, &table), vec![RuleHit::missing(RecordId(0))]);
    }
}
