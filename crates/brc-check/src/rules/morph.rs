use brc_core::{Flag, RecordTable};

use super::{Rule, RuleHit};
use crate::context::CheckContext;

/// Plumage morph recorded on a species that is not expected to carry one.
pub struct UnexpectedMorph;

impl Rule for UnexpectedMorph {
    fn name(&self) -> &'static str {
        "morph"
    }

    fn check(&self, table: &RecordTable, ctx: &CheckContext) -> Vec<RuleHit> {
        let exceptions = &ctx.reference.morph_exceptions;
        table
            .observations()
            .filter(|record| record.morph_code().is_some())
            .filter(|record| {
                record
                    .species()
                    .is_none_or(|species| !exceptions.contains(species))
            })
            .map(|record| RuleHit::new(record.id, Flag::UnexpectedMorph))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::{hit_ids, obs, table};
    use brc_core::CountRecord;

    fn with_morph(species: &str, morph: Option<&str>) -> CountRecord {
        CountRecord {
            morph: morph.map(str::to_string),
            ..obs(species, 1)
        }
    }

    #[test]
    fn booted_eagle_may_carry_morph() {
        let table = table(vec![
            with_morph("BootedE", Some("D")),
            with_morph("BootedE", Some("L")),
            with_morph("HB", Some("D")),
            with_morph("SteppeE", Some("L")),
            with_morph("HB", None),
        ]);
        assert_eq!(hit_ids(&UnexpectedMorph, &table), vec![2, 3]);
    }
}
