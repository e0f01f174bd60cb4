//! Juvenile harriers named to exact species at the far ends of the scale.

use brc_core::{Flag, RecordTable};

use super::{Rule, RuleHit};
use crate::context::CheckContext;

pub struct JuvenileHarrier;

impl Rule for JuvenileHarrier {
    fn name(&self) -> &'static str {
        "harrier"
    }

    fn check(&self, table: &RecordTable, ctx: &CheckContext) -> Vec<RuleHit> {
        let reference = &ctx.reference;
        table
            .observations()
            .filter(|record| {
                record
                    .species()
                    .is_some_and(|species| reference.exact_harriers.contains(species))
            })
            .filter(|record| record.age_code() == Some(reference.juvenile_age.as_str()))
            .filter(|record| {
                record
                    .distance()
                    .is_some_and(|code| reference.long_range_codes.contains(&code))
            })
            .map(|record| RuleHit::new(record.id, Flag::UnreliableAgeing))
            .collect()
    }
}
