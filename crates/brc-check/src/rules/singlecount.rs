//! During the HB focus period the focus station single-counts every HB flock.
//! Records there without the single-count marker probably lost it.

use brc_core::{Flag, RecordTable};

use super::{Rule, RuleHit};
use crate::context::CheckContext;

pub struct SingleCount;

impl Rule for SingleCount {
    fn name(&self) -> &'static str {
        "singlecount"
    }

    fn check(&self, table: &RecordTable, ctx: &CheckContext) -> Vec<RuleHit> {
        let Some(focus) = &ctx.focus else {
            tracing::debug!("no focus period; single-count check skipped");
            return Vec::new();
        };
        let focus_species = ctx.reference.focus_species.as_str();

        table
            .observations()
            .filter(|record| record.species() == Some(focus_species))
            .filter(|record| !record.is_single_count())
            .filter_map(|record| match focus.covers(record) {
                Some(true) => Some(RuleHit::new(record.id, Flag::SinglecountMissing)),
                Some(false) => None,
                None => Some(RuleHit::missing(record.id)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::{S1, S2, at, hit_ids, hit_ids_with, hits, obs, table};
    use brc_core::{CountRecord, RecordId};

    fn focus_ctx() -> CheckContext {
        CheckContext::default().with_focus(S2, at(8, 0)..=at(12, 0))
    }

    fn hb(station: &str, h: u32, count_type: Option<&str>) -> CountRecord {
        CountRecord {
            telpost: Some(station.into()),
            datetime: Some(at(h, 0)),
            count_type: count_type.map(str::to_string),
            ..obs("HB", 40)
        }
    }

    #[test]
    fn unmarked_hb_in_focus_window_is_flagged() {
        let table = table(vec![
            hb(S2, 9, None),
            hb(S2, 9, Some("S")),
            hb(S2, 12, Some("D")),
            hb(S2, 13, None),
            hb(S1, 9, None),
        ]);
        assert_eq!(hit_ids_with(&SingleCount, &table, &focus_ctx()), vec![0, 2]);
    }

    #[test]
    fn other_species_are_not_checked() {
        let table = table(vec![CountRecord {
            telpost: Some(S2.into()),
            ..obs("BK", 3)
        }]);
        assert!(hit_ids_with(&SingleCount, &table, &focus_ctx()).is_empty());
    }

    #[test]
    fn undecidable_record_gets_missing_flag() {
        let table = table(vec![CountRecord {
            datetime: None,
            ..hb(S2, 9, None)
        }]);
        let hits = SingleCount.check(&table, &focus_ctx());
        assert_eq!(hits, vec![RuleHit::missing(RecordId(0))]);
    }

    #[test]
    fn disabled_without_focus_period() {
        let table = table(vec![hb(S2, 9, None)]);
        assert!(hit_ids(&SingleCount, &table).is_empty());
        assert!(hits(&SingleCount, &table).is_empty());
    }
}
