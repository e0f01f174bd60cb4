//! Structural repairs applied before any rule runs.
//!
//! 1. Records with a date but no time get `00:00:00` on that date.
//! 2. Each registered count session gets one START and one END row.
//! 3. The table is sorted chronologically, then by station.
//!
//! Normalizing an already normalized table changes nothing.

use brc_core::{CountSession, RecordKind, RecordTable};
use chrono::NaiveTime;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeSummary {
    pub timestamps_defaulted: usize,
    pub boundaries_inserted: usize,
    pub sessions_skipped: usize,
}

pub fn normalize(table: &mut RecordTable, sessions: &[CountSession]) -> NormalizeSummary {
    let mut summary = NormalizeSummary::default();

    for record in table.iter_mut() {
        if record.datetime.is_none() {
            if let Some(date) = record.date {
                record.datetime = Some(date.and_time(NaiveTime::MIN));
                summary.timestamps_defaulted += 1;
            }
        }
    }

    for session in sessions {
        if let Err(error) = session.validate() {
            tracing::warn!(%error, "skipping count session");
            summary.sessions_skipped += 1;
            continue;
        }
        for (kind, datetime) in [
            (RecordKind::SessionStart, session.start),
            (RecordKind::SessionEnd, session.end),
        ] {
            if table.has_boundary(kind, &session.telpost, datetime) {
                continue;
            }
            table.push_boundary(kind, &session.telpost, datetime);
            summary.boundaries_inserted += 1;
        }
    }

    table.sort_chronologically();

    tracing::debug!(
        timestamps_defaulted = summary.timestamps_defaulted,
        boundaries_inserted = summary.boundaries_inserted,
        "normalized table"
    );
    summary
}
