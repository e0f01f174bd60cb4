use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Flag;

/// Append-only, ordered set of flags attached to one record.
///
/// A raised flag is never cleared, so the set exposes no removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Flags(BTreeSet<Flag>);

impl Flags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag. Returns `true` if it was not present yet.
    pub fn insert(&mut self, flag: Flag) -> bool {
        self.0.insert(flag)
    }

    #[must_use]
    pub fn contains(&self, flag: Flag) -> bool {
        self.0.contains(&flag)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.iter().copied()
    }

    /// The `check` column text: labels joined by `", "`.
    #[must_use]
    pub fn labels(&self) -> String {
        self.0
            .iter()
            .map(|flag| flag.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Extend<Flag> for Flags {
    fn extend<T: IntoIterator<Item = Flag>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl FromIterator<Flag> for Flags {
    fn from_iter<T: IntoIterator<Item = Flag>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
