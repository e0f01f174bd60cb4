use brc_core::RecordTable;

use super::{Rule, RuleHit};
use crate::context::CheckContext;

/// Any essential column absent or blank, or a zero count.
pub struct MissingFields;

impl Rule for MissingFields {
    fn name(&self) -> &'static str {
        "missing"
    }

    fn check(&self, table: &RecordTable, _ctx: &CheckContext) -> Vec<RuleHit> {
        table
            .observations()
            .filter(|record| !record.missing_essential_fields().is_empty())
            .map(|record| {
                tracing::trace!(
                    id = %record.id,
                    fields = ?record.missing_essential_fields(),
                    "essential fields missing"
                );
                RuleHit::missing(record.id)
            })
            .collect()
    }
}
