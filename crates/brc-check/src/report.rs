//! Batch summary returned by the pipeline and printed by `brc check`.

use std::collections::BTreeMap;

use brc_core::RecordTable;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Hits one rule produced in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleSummary {
    pub name: String,
    pub hits: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CheckReport {
    /// Rows in the table after normalization, boundaries included.
    pub records: usize,
    pub observations: usize,
    pub boundaries_inserted: usize,
    pub timestamps_defaulted: usize,
    pub sessions_skipped: usize,
    /// Observations carrying at least one flag.
    pub flagged_records: usize,
    /// Records carrying each flag, keyed by flag identifier.
    pub flag_counts: BTreeMap<String, usize>,
    pub rules: Vec<RuleSummary>,
}

impl CheckReport {
    /// Fill the table-derived counts from the final table.
    pub(crate) fn tally(&mut self, table: &RecordTable) {
        self.records = table.len();
        self.observations = table.observations().count();
        self.flagged_records = 0;
        self.flag_counts.clear();
        for record in table.observations() {
            if record.flags.is_empty() {
                continue;
            }
            self.flagged_records += 1;
            for flag in record.flags.iter() {
                *self.flag_counts.entry(flag.as_str().to_string()).or_default() += 1;
            }
        }
    }

    #[must_use]
    pub fn total_hits(&self) -> usize {
        self.rules.iter().map(|rule| rule.hits).sum()
    }
}
