//! Aged tallies are only credible close to the station.

use brc_core::{Flag, RecordTable};

use super::{Rule, RuleHit};
use crate::context::CheckContext;

pub struct AgeingDistance;

impl Rule for AgeingDistance {
    fn name(&self) -> &'static str {
        "ageing_distance"
    }

    fn check(&self, table: &RecordTable, ctx: &CheckContext) -> Vec<RuleHit> {
        let reference = &ctx.reference;
        let mut hits = Vec::new();
        for record in table.observations() {
            let Some(species) = record.species() else {
                continue;
            };
            if !reference.is_aged_species(species) {
                continue;
            }
            if record.location_code().is_none() {
                hits.push(RuleHit::missing(record.id));
                continue;
            }
            // Unknown codes cannot be inside the window either.
            let inside = record
                .distance()
                .is_some_and(|code| reference.ageing_window.contains(code));
            if !inside {
                hits.push(RuleHit::new(record.id, Flag::AgeingDistance));
            }
        }
        hits
    }
}
