//! Merging rule hits onto the table.

use std::collections::BTreeMap;

use brc_core::{Flag, RecordTable};
use serde::Serialize;

use crate::rules::RuleHit;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateSummary {
    /// Hits that landed on a record.
    pub applied: usize,
    /// Hits that raised a flag the record did not carry yet.
    pub new_flags: usize,
    /// Hits naming an id that is not in the table.
    pub unknown_ids: usize,
    /// Hits naming a START/END row.
    pub skipped_boundary: usize,
    /// Applied hits per flag.
    pub per_flag: BTreeMap<Flag, usize>,
}

/// Union every hit into the flags of the record it names.
///
/// Existing flags are kept. Applying the same hits twice leaves the table as
/// it was after the first time.
pub fn apply(table: &mut RecordTable, hits: impl IntoIterator<Item = RuleHit>) -> AggregateSummary {
    let positions = table.position_index();
    let mut summary = AggregateSummary::default();

    for hit in hits {
        let Some(record) = positions
            .get(&hit.id)
            .and_then(|&position| table.get_mut_at(position))
        else {
            tracing::warn!(id = %hit.id, flag = %hit.flag, "hit for unknown record ignored");
            summary.unknown_ids += 1;
            continue;
        };
        if !record.is_observation() {
            tracing::warn!(id = %hit.id, flag = %hit.flag, "hit for boundary row ignored");
            summary.skipped_boundary += 1;
            continue;
        }
        if record.flags.insert(hit.flag) {
            summary.new_flags += 1;
        }
        summary.applied += 1;
        *summary.per_flag.entry(hit.flag).or_default() += 1;
    }

    summary
}
