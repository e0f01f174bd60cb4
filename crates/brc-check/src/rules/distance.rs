//! Locations past the far end of the scale, or not on the scale at all.

use brc_core::{Flag, RecordTable};

use super::{Rule, RuleHit};
use crate::context::CheckContext;

pub struct ExtremeDistance;

impl Rule for ExtremeDistance {
    fn name(&self) -> &'static str {
        "distance"
    }

    fn check(&self, table: &RecordTable, _ctx: &CheckContext) -> Vec<RuleHit> {
        table
            .observations()
            .filter(|record| {
                record
                    .location_code()
                    .is_some_and(|_| record.distance().is_none_or(|code| code.is_beyond_scale()))
            })
            .map(|record| RuleHit::new(record.id, Flag::UnusualLocation))
            .collect()
    }
}
