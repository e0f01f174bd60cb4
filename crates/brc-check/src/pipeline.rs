//! The full check of one batch: normalize, run every rule, merge the hits.

use brc_core::{CountSession, RecordTable};

use crate::aggregate;
use crate::context::CheckContext;
use crate::normalize::{NormalizeSummary, normalize};
use crate::report::{CheckReport, RuleSummary};
use crate::rules::{Rule, RuleHit, default_rules};

pub struct Checker {
    ctx: CheckContext,
    rules: Vec<Box<dyn Rule>>,
}

impl Checker {
    /// A checker running every built-in rule.
    #[must_use]
    pub fn new(ctx: CheckContext) -> Self {
        Self::with_rules(ctx, default_rules())
    }

    #[must_use]
    pub fn with_rules(ctx: CheckContext, rules: Vec<Box<dyn Rule>>) -> Self {
        Self { ctx, rules }
    }

    /// Run every rule over the table without touching it.
    #[must_use]
    pub fn check(&self, table: &RecordTable) -> Vec<RuleHit> {
        self.run_rules(table).into_iter().flat_map(|(_, hits)| hits).collect()
    }

    fn run_rules(&self, table: &RecordTable) -> Vec<(&'static str, Vec<RuleHit>)> {
        self.rules
            .iter()
            .map(|rule| {
                let hits = rule.check(table, &self.ctx);
                tracing::debug!(rule = rule.name(), hits = hits.len(), "rule finished");
                (rule.name(), hits)
            })
            .collect()
    }

    /// Normalize the table against `sessions`, check it, and flag it in place.
    pub fn run(&self, table: &mut RecordTable, sessions: &[CountSession]) -> CheckReport {
        let normalized = normalize(table, sessions);
        self.flag(table, normalized)
    }

    /// Check and flag a table that has already been normalized. `normalized`
    /// is carried into the report.
    pub fn flag(&self, table: &mut RecordTable, normalized: NormalizeSummary) -> CheckReport {
        let mut report = CheckReport {
            boundaries_inserted: normalized.boundaries_inserted,
            timestamps_defaulted: normalized.timestamps_defaulted,
            sessions_skipped: normalized.sessions_skipped,
            ..CheckReport::default()
        };

        let mut all_hits = Vec::new();
        for (name, hits) in self.run_rules(table) {
            report.rules.push(RuleSummary {
                name: name.to_string(),
                hits: hits.len(),
            });
            all_hits.extend(hits);
        }

        let merged = aggregate::apply(table, all_hits);
        if merged.unknown_ids > 0 || merged.skipped_boundary > 0 {
            tracing::warn!(
                unknown_ids = merged.unknown_ids,
                skipped_boundary = merged.skipped_boundary,
                "some rule hits were not applied"
            );
        }

        report.tally(table);
        tracing::info!(
            records = report.records,
            flagged = report.flagged_records,
            new_flags = merged.new_flags,
            "batch checked"
        );
        report
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new(CheckContext::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::{obs, table};
    use brc_core::{CountRecord, Flag, RecordId};
    use pretty_assertions::assert_eq;

    struct FlagEverything;

    impl Rule for FlagEverything {
        fn name(&self) -> &'static str {
            "everything"
        }

        fn check(&self, table: &RecordTable, _ctx: &CheckContext) -> Vec<RuleHit> {
            table
                .iter()
                .map(|record| RuleHit::new(record.id, Flag::UnusualLocation))
                .collect()
        }
    }

    #[test]
    fn custom_rules_replace_defaults() {
        let checker = Checker::with_rules(CheckContext::default(), vec![Box::new(FlagEverything)]);
        let mut table = table(vec![obs("HB", 1), obs("BK", 2)]);
        let report = checker.run(&mut table, &[]);
        assert_eq!(report.rules.len(), 1);
        assert_eq!(report.total_hits(), 2);
        assert_eq!(report.flagged_records, 2);
        assert_eq!(report.flag_counts.get("unusual_location"), Some(&2));
    }

    #[test]
    fn report_counts_flags_per_record() {
        let mut table = table(vec![
            obs("HB", 1),
            CountRecord {
                count: None,
                morph: Some("D".into()),
                ..obs("HB", 1)
            },
        ]);
        let report = Checker::default().run(&mut table, &[]);
        assert_eq!(report.records, 2);
        assert_eq!(report.flagged_records, 1);
        assert_eq!(report.flag_counts.get("missing_essential_fields"), Some(&1));
        assert_eq!(report.flag_counts.get("unexpected_morph"), Some(&1));
        assert!(table.get(RecordId(0)).unwrap().flags.is_empty());
    }

    #[test]
    fn check_does_not_mutate() {
        let table = table(vec![CountRecord {
            count: None,
            ..obs("HB", 1)
        }]);
        let before = table.clone();
        let hits = Checker::default().check(&table);
        assert_eq!(hits, vec![RuleHit::missing(RecordId(0))]);
        assert_eq!(table, before);
    }
}
