//! Independent rule checks.
//!
//! Every rule reads the table and returns the hits it wants applied. Rules
//! never mutate records and never fail on data: a record a rule cannot judge
//! because a field is missing gets [`Flag::MissingEssentialFields`] instead.
//! Only observations are checked; START/END rows are skipped.

use brc_core::{Flag, RecordId, RecordTable};

use crate::context::CheckContext;

pub mod age_count;
pub mod ageing_distance;
pub mod combinations;
pub mod distance;
pub mod doublecount;
pub mod harrier;
pub mod injury;
pub mod missing;
pub mod morph;
pub mod singlecount;
pub mod timestamp;

/// One flag a rule wants raised on one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleHit {
    pub id: RecordId,
    pub flag: Flag,
}

impl RuleHit {
    #[must_use]
    pub const fn new(id: RecordId, flag: Flag) -> Self {
        Self { id, flag }
    }

    #[must_use]
    pub const fn missing(id: RecordId) -> Self {
        Self::new(id, Flag::MissingEssentialFields)
    }
}

/// A stateless check over a whole record table.
pub trait Rule {
    /// Stable identifier used in logs and reports.
    fn name(&self) -> &'static str;

    fn check(&self, table: &RecordTable, ctx: &CheckContext) -> Vec<RuleHit>;
}

/// Every built-in rule. Order is irrelevant to the outcome.
#[must_use]
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(doublecount::Doublecount),
        Box::new(injury::InjuredKilled),
        Box::new(missing::MissingFields),
        Box::new(distance::ExtremeDistance),
        Box::new(morph::UnexpectedMorph),
        Box::new(age_count::AgeCount),
        Box::new(singlecount::SingleCount),
        Box::new(ageing_distance::AgeingDistance),
        Box::new(combinations::AgeSexCombinations),
        Box::new(harrier::JuvenileHarrier),
        Box::new(timestamp::DefaultedTimestamp),
    ]
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rule_names_are_unique() {
        let rules = default_rules();
        let names: HashSet<_> = rules.iter().map(|rule| rule.name()).collect();
        assert_eq!(names.len(), rules.len());
        assert_eq!(rules.len(), 11);
    }

    #[test]
    fn rules_skip_boundary_rows() {
        let mut table = RecordTable::new();
        table.push_boundary(
            brc_core::RecordKind::SessionStart,
            fixtures::S1,
            fixtures::at(0, 0),
        );
        let ctx = CheckContext::default();
        for rule in default_rules() {
            assert!(rule.check(&table, &ctx).is_empty(), "{}", rule.name());
        }
    }
}
