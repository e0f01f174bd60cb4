//! More than one injured or killed bird in a single record is rare enough to
//! be worth a second look.

use brc_core::{Flag, RecordTable};

use super::{Rule, RuleHit};
use crate::context::CheckContext;

pub struct InjuredKilled;

impl Rule for InjuredKilled {
    fn name(&self) -> &'static str {
        "injury"
    }

    fn check(&self, table: &RecordTable, _ctx: &CheckContext) -> Vec<RuleHit> {
        table
            .observations()
            .filter(|record| record.injured_killed_count().is_some_and(|n| n > 1))
            .map(|record| RuleHit::new(record.id, Flag::UnusualInjuredKilled))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::{hit_ids, obs, table};

    #[test]
    fn flags_multiple_casualties_only() {
        let single = brc_core::CountRecord {
            migtype: Some("K".into()),
            ..obs("Hen", 1)
        };
        let several = brc_core::CountRecord {
            migtype: Some("I".into()),
            ..obs("HB", 2)
        };
        let migrating = obs("HB", 300);
        let table = table(vec![single, several, migrating]);
        assert_eq!(hit_ids(&InjuredKilled, &table), vec![1]);
    }
}
