//! Record kinds and flag identifiers.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// RecordKind
// ---------------------------------------------------------------------------

/// Whether a row is a real observation or a synthetic session boundary.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    #[default]
    Observation,
    SessionStart,
    SessionEnd,
}

impl RecordKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Observation => "observation",
            Self::SessionStart => "session_start",
            Self::SessionEnd => "session_end",
        }
    }

    /// Species name carried by synthetic boundary rows.
    #[must_use]
    pub const fn boundary_label(self) -> Option<&'static str> {
        match self {
            Self::Observation => None,
            Self::SessionStart => Some("START"),
            Self::SessionEnd => Some("END"),
        }
    }

    #[must_use]
    pub const fn is_boundary(self) -> bool {
        !matches!(self, Self::Observation)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Flag
// ---------------------------------------------------------------------------

/// A reason for a coordinator to look at a record.
///
/// Declaration order is the order flags are listed in output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    UnexpectedAge,
    UnexpectedSex,
    UnexpectedAgeSexCombination,
    AgeingDistance,
    SinglecountMissing,
    AgeCountMismatch,
    UnexpectedMorph,
    IncorrectTimestamp,
    UnusualLocation,
    MissingEssentialFields,
    ErroneousDoublecount,
    UnusualInjuredKilled,
    UnreliableAgeing,
}

impl Flag {
    pub const ALL: [Self; 13] = [
        Self::UnexpectedAge,
        Self::UnexpectedSex,
        Self::UnexpectedAgeSexCombination,
        Self::AgeingDistance,
        Self::SinglecountMissing,
        Self::AgeCountMismatch,
        Self::UnexpectedMorph,
        Self::IncorrectTimestamp,
        Self::UnusualLocation,
        Self::MissingEssentialFields,
        Self::ErroneousDoublecount,
        Self::UnusualInjuredKilled,
        Self::UnreliableAgeing,
    ];

    /// Identifier used in JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnexpectedAge => "unexpected_age",
            Self::UnexpectedSex => "unexpected_sex",
            Self::UnexpectedAgeSexCombination => "unexpected_age_sex_combination",
            Self::AgeingDistance => "ageing_distance",
            Self::SinglecountMissing => "singlecount_missing",
            Self::AgeCountMismatch => "age_count_mismatch",
            Self::UnexpectedMorph => "unexpected_morph",
            Self::IncorrectTimestamp => "incorrect_timestamp",
            Self::UnusualLocation => "unusual_location",
            Self::MissingEssentialFields => "missing_essential_fields",
            Self::ErroneousDoublecount => "erroneous_doublecount",
            Self::UnusualInjuredKilled => "unusual_injured_killed",
            Self::UnreliableAgeing => "unreliable_ageing",
        }
    }

    /// Wording shown to coordinators in the `check` column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UnexpectedAge => "unexpected age",
            Self::UnexpectedSex => "unexpected sex",
            Self::UnexpectedAgeSexCombination => "unexpected age + sex combination",
            Self::AgeingDistance => "ageing distance",
            Self::SinglecountMissing => "singlecount missing? (leave as is)",
            Self::AgeCountMismatch => "mismatch number of counted and aged birds",
            Self::UnexpectedMorph => "unexpected morph",
            Self::IncorrectTimestamp => "incorrect timestamp",
            Self::UnusualLocation => "unusual location",
            Self::MissingEssentialFields => "gaps in essential columns",
            Self::ErroneousDoublecount => "erroneous doublecount",
            Self::UnusualInjuredKilled => "unusual nr of killed/injured birds",
            Self::UnreliableAgeing => "unreliable ageing",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
