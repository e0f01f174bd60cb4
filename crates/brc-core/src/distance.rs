//! The west-to-east distance scale used on the count transect.
//!
//! Observers record every passing flock with a distance code relative to the
//! station: `W3 < W2 < W1 < O < E1 < E2 < E3`, plus `>E3` for anything past the
//! outermost band. Variants are declared in scale order so the derived `Ord`
//! is the transect order and window checks become range tests.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum DistanceCode {
    #[serde(rename = "W3")]
    W3,
    #[serde(rename = "W2")]
    W2,
    #[serde(rename = "W1")]
    W1,
    #[serde(rename = "O")]
    O,
    #[serde(rename = "E1")]
    E1,
    #[serde(rename = "E2")]
    E2,
    #[serde(rename = "E3")]
    E3,
    #[serde(rename = ">E3")]
    BeyondE3,
}

impl DistanceCode {
    /// Every code, west to east.
    pub const ALL: [Self; 8] = [
        Self::W3,
        Self::W2,
        Self::W1,
        Self::O,
        Self::E1,
        Self::E2,
        Self::E3,
        Self::BeyondE3,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W3 => "W3",
            Self::W2 => "W2",
            Self::W1 => "W1",
            Self::O => "O",
            Self::E1 => "E1",
            Self::E2 => "E2",
            Self::E3 => "E3",
            Self::BeyondE3 => ">E3",
        }
    }

    /// Whether the code lies past the last regular band.
    #[must_use]
    pub fn is_beyond_scale(self) -> bool {
        self > Self::E3
    }

    /// Parse a code as entered in the field app. Surrounding whitespace and
    /// letter case are ignored.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for DistanceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::UnknownDistanceCode(s.to_string()))
    }
}
