//! Age and sex codes checked against each species' expectation.
//!
//! Independent expectations judge age and sex separately and can raise both
//! flags. Pair expectations only know whole combinations and raise a single
//! combination flag.

use brc_core::{Flag, RecordTable};

use super::{Rule, RuleHit};
use crate::context::CheckContext;
use crate::reference::SpeciesExpectation;

pub struct AgeSexCombinations;

impl Rule for AgeSexCombinations {
    fn name(&self) -> &'static str {
        "combinations"
    }

    fn check(&self, table: &RecordTable, ctx: &CheckContext) -> Vec<RuleHit> {
        let mut hits = Vec::new();
        for record in table.observations() {
            let Some(expectation) = record
                .species()
                .and_then(|species| ctx.reference.combinations.get(species))
            else {
                continue;
            };
            let age = record.age_code();
            let sex = record.sex_code();
            match expectation {
                SpeciesExpectation::Independent {
                    age: age_rule,
                    sex: sex_rule,
                } => {
                    if !age_rule.accepts(age) {
                        hits.push(RuleHit::new(record.id, Flag::UnexpectedAge));
                    }
                    if !sex_rule.accepts(sex) {
                        hits.push(RuleHit::new(record.id, Flag::UnexpectedSex));
                    }
                }
                SpeciesExpectation::Pairs { pairs } => {
                    let listed = pairs
                        .iter()
                        .any(|pair| pair.age.as_deref() == age && pair.sex.as_deref() == sex);
                    if !listed {
                        hits.push(RuleHit::new(record.id, Flag::UnexpectedAgeSexCombination));
                    }
                }
            }
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::{hits, obs, table};
    use brc_core::{CountRecord, RecordId};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn coded(species: &str, age: Option<&str>, sex: Option<&str>) -> CountRecord {
        CountRecord {
            age: age.map(str::to_string),
            sex: sex.map(str::to_string),
            ..obs(species, 1)
        }
    }

    fn flags_for(record: CountRecord) -> Vec<Flag> {
        let table = table(vec![record]);
        hits(&AgeSexCombinations, &table)
            .into_iter()
            .map(|hit| hit.flag)
            .collect()
    }

    #[rstest]
    #[case::aged_total("HB", Some("J"), None, vec![Flag::UnexpectedAge])]
    #[case::sexed_total("BK", None, Some("M"), vec![Flag::UnexpectedSex])]
    #[case::both_wrong("HB", Some("A"), Some("F"), vec![Flag::UnexpectedAge, Flag::UnexpectedSex])]
    #[case::mandatory_age("SteppeE", None, None, vec![Flag::UnexpectedAge])]
    #[case::optional_age("StepBuz", None, None, vec![])]
    #[case::booted_adult("BootedE", Some("A"), None, vec![Flag::UnexpectedAge])]
    #[case::crested_hb("CrestedHB", Some("J"), Some("F"), vec![])]
    #[case::nonjuv_sexed("HB_NONJUV", None, Some("M"), vec![])]
    #[case::unknown_species("Sparrowhawk", Some("X"), Some("Y"), vec![])]
    fn independent_expectations(
        #[case] species: &str,
        #[case] age: Option<&str>,
        #[case] sex: Option<&str>,
        #[case] expected: Vec<Flag>,
    ) {
        assert_eq!(flags_for(coded(species, age, sex)), expected);
    }

    #[rstest]
    #[case::juvenile("Mon", Some("J"), None, false)]
    #[case::sexed_juvenile("Mon", Some("J"), Some("M"), true)]
    #[case::adult_male("Pal", Some("A"), Some("M"), false)]
    #[case::adult_unsexed("Pal", Some("A"), None, true)]
    #[case::ringtail("Hen", None, Some("FC"), false)]
    #[case::ringtail_on_mon("Mon", None, Some("FC"), true)]
    #[case::unidentified("MonPalHen", None, None, false)]
    #[case::unidentified_immature("MonPalHen", Some("I"), Some("M"), true)]
    fn harrier_pairs(
        #[case] species: &str,
        #[case] age: Option<&str>,
        #[case] sex: Option<&str>,
        #[case] flagged: bool,
    ) {
        let flags = flags_for(coded(species, age, sex));
        if flagged {
            assert_eq!(flags, vec![Flag::UnexpectedAgeSexCombination]);
        } else {
            assert!(flags.is_empty());
        }
    }

    #[test]
    fn hit_carries_record_id() {
        let table = table(vec![obs("HB", 1), coded("HB", Some("J"), None)]);
        assert_eq!(
            hits(&AgeSexCombinations, &table),
            vec![RuleHit::new(RecordId(1), Flag::UnexpectedAge)]
        );
    }
}
