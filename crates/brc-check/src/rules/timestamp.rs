//! Observations at exactly midnight got their time from the normalizer, not
//! from the observer.

use brc_core::{Flag, RecordTable};
use chrono::NaiveTime;

use super::{Rule, RuleHit};
use crate::context::CheckContext;

pub struct DefaultedTimestamp;

impl Rule for DefaultedTimestamp {
    fn name(&self) -> &'static str {
        "timestamp"
    }

    fn check(&self, table: &RecordTable, _ctx: &CheckContext) -> Vec<RuleHit> {
        table
            .observations()
            .filter(|record| record.time_of_day() == Some(NaiveTime::MIN))
            .map(|record| RuleHit::new(record.id, Flag::IncorrectTimestamp))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::{at, hit_ids, obs, table};
    use brc_core::CountRecord;

    #[test]
    fn midnight_is_flagged() {
        let midnight = CountRecord {
            datetime: Some(at(0, 0)),
            ..obs("HB", 3)
        };
        let undated = CountRecord {
            datetime: None,
            ..obs("HB", 3)
        };
        let table = table(vec![obs("HB", 3), midnight, undated]);
        assert_eq!(hit_ids(&DefaultedTimestamp, &table), vec![1]);
    }
}
