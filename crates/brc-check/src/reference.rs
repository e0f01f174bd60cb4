//! Species reference tables consumed by the rule checks.
//!
//! Everything species-specific lives here as lookup structures keyed by
//! species code, so a new species is a table entry rather than a new branch
//! in rule logic. The built-in tables describe the Batumi count; a TOML file
//! with the same shape replaces them wholesale.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use brc_core::DistanceCode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CheckError;

// ---------------------------------------------------------------------------
// Age/sex expectations
// ---------------------------------------------------------------------------

/// What a single field (age or sex) may contain for a species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "expect", rename_all = "snake_case")]
pub enum FieldRule {
    /// The field must be empty.
    Absent,
    /// The field must hold one of `values`; it may be empty when `optional`.
    OneOf { values: Vec<String>, optional: bool },
}

impl FieldRule {
    /// Whether `value` is acceptable under this rule.
    #[must_use]
    pub fn accepts(&self, value: Option<&str>) -> bool {
        match (self, value) {
            (Self::Absent, None) => true,
            (Self::Absent, Some(_)) => false,
            (Self::OneOf { optional, .. }, None) => *optional,
            (Self::OneOf { values, .. }, Some(v)) => values.iter().any(|allowed| allowed == v),
        }
    }
}

/// One accepted `(age, sex)` combination. `None` means the field is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AgeSexPair {
    pub age: Option<String>,
    pub sex: Option<String>,
}

/// Valid age/sex information for one species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpeciesExpectation {
    /// Age and sex are judged separately.
    Independent { age: FieldRule, sex: FieldRule },
    /// Only the listed combinations are valid (harriers, where the sex can
    /// only be told on older birds).
    Pairs { pairs: Vec<AgeSexPair> },
}

// ---------------------------------------------------------------------------
// Aged tallies and distance windows
// ---------------------------------------------------------------------------

/// A species counted in total plus separate aged tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AgedTally {
    /// Species code of the total count, e.g. `HB`.
    pub total: String,
    /// Species codes of the aged tallies, e.g. `HB_NONJUV`, `HB_JUV`.
    pub aged: Vec<String>,
    /// Aged tallies taken during the focus period without a single count
    /// are not reconciled.
    #[serde(default)]
    pub focus_exempt: bool,
}

/// An inclusive stretch of the distance scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DistanceWindow {
    pub west: DistanceCode,
    pub east: DistanceCode,
}

impl DistanceWindow {
    #[must_use]
    pub fn contains(self, code: DistanceCode) -> bool {
        (self.west..=self.east).contains(&code)
    }
}

// ---------------------------------------------------------------------------
// ReferenceData
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceData {
    /// Species whose plumage morph is recorded on purpose.
    pub morph_exceptions: BTreeSet<String>,

    /// Legacy species codes renamed on ingest.
    pub species_aliases: BTreeMap<String, String>,

    /// Species whose single-count discipline is checked during the focus period.
    pub focus_species: String,

    /// Total/aged tally groups reconciled by the age-count check.
    pub aged_tallies: Vec<AgedTally>,

    /// Distance window in which aged tallies are credible.
    pub ageing_window: DistanceWindow,

    /// Harrier codes that name an exact species (not `MonPalHen`).
    pub exact_harriers: BTreeSet<String>,

    /// Age code used for juveniles.
    pub juvenile_age: String,

    /// Distance codes too far out to identify juvenile harriers reliably.
    pub long_range_codes: BTreeSet<DistanceCode>,

    /// Station → own distance code → the other station's codes that cover
    /// the same airspace. Drives doublecount pairing.
    pub overlap_zones: BTreeMap<String, BTreeMap<String, Vec<DistanceCode>>>,

    /// Valid age/sex information per species. Species without an entry are
    /// not checked.
    pub combinations: BTreeMap<String, SpeciesExpectation>,
}

impl ReferenceData {
    /// Load tables from a TOML file with the same shape as the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Read`] if the file cannot be read and
    /// [`CheckError::Reference`] if it does not parse.
    pub fn from_toml_file(path: &Path) -> Result<Self, CheckError> {
        let text = std::fs::read_to_string(path).map_err(|source| CheckError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| CheckError::Reference {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Canonical species code after alias renaming.
    #[must_use]
    pub fn canonical_species<'a>(&'a self, species: &'a str) -> &'a str {
        self.species_aliases
            .get(species)
            .map_or(species, String::as_str)
    }

    /// Every aged tally species code across all groups.
    pub fn aged_species(&self) -> impl Iterator<Item = &str> {
        self.aged_tallies
            .iter()
            .flat_map(|tally| tally.aged.iter().map(String::as_str))
    }

    #[must_use]
    pub fn is_aged_species(&self, species: &str) -> bool {
        self.aged_species().any(|aged| aged == species)
    }

    /// Whether `other` at the other station overlaps `own` at `station`.
    /// `None` when the station or its code has no overlap entry.
    #[must_use]
    pub fn overlaps(&self, station: &str, own: &str, other: DistanceCode) -> Option<bool> {
        self.overlap_zones
            .get(station)
            .and_then(|zones| zones.get(own))
            .map(|codes| codes.contains(&other))
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            morph_exceptions: strings(&["BootedE"]).into_iter().collect(),
            species_aliases: BTreeMap::from([("HB_AD".to_string(), "HB_NONJUV".to_string())]),
            focus_species: "HB".to_string(),
            aged_tallies: vec![
                AgedTally {
                    total: "HB".to_string(),
                    aged: strings(&["HB_NONJUV", "HB_JUV"]),
                    focus_exempt: true,
                },
                AgedTally {
                    total: "BK".to_string(),
                    aged: strings(&["BK_NONJUV", "BK_JUV"]),
                    focus_exempt: false,
                },
            ],
            ageing_window: DistanceWindow {
                west: DistanceCode::W1,
                east: DistanceCode::E1,
            },
            exact_harriers: strings(&["Mon", "Pal", "Hen", "Marsh"])
                .into_iter()
                .collect(),
            juvenile_age: "J".to_string(),
            long_range_codes: BTreeSet::from([DistanceCode::W3, DistanceCode::E3]),
            overlap_zones: default_overlap_zones(),
            combinations: default_combinations(),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn default_overlap_zones() -> BTreeMap<String, BTreeMap<String, Vec<DistanceCode>>> {
    use DistanceCode::{E1, E2, E3, O, W1, W2, W3};

    let station1 = BTreeMap::from([
        ("W3".to_string(), vec![W3]),
        ("W2".to_string(), vec![W3]),
        ("W1".to_string(), vec![W3]),
        ("O".to_string(), vec![W3]),
        ("E1".to_string(), vec![W3]),
        ("E2".to_string(), vec![W3, W2]),
        ("E3".to_string(), vec![W2, W1, O, E1, E2, E3]),
    ]);
    let station2 = BTreeMap::from([
        ("W3".to_string(), vec![W3, W2, W1, O, E1, E2]),
        ("W2".to_string(), vec![E3, E2]),
        ("W1".to_string(), vec![E3]),
        ("O".to_string(), vec![E3]),
        ("E1".to_string(), vec![E3]),
        ("E2".to_string(), vec![E3]),
        ("E3".to_string(), vec![E3]),
    ]);

    BTreeMap::from([
        ("1. Sakhalvasho".to_string(), station1),
        ("2. Shuamta".to_string(), station2),
    ])
}

const ALL_AGES: [&str; 4] = ["J", "I", "A", "Non-Juv"];

fn one_of(values: &[&str], optional: bool) -> FieldRule {
    FieldRule::OneOf {
        values: strings(values),
        optional,
    }
}

fn unaged() -> SpeciesExpectation {
    SpeciesExpectation::Independent {
        age: FieldRule::Absent,
        sex: FieldRule::Absent,
    }
}

fn aged(values: &[&str], optional: bool) -> SpeciesExpectation {
    SpeciesExpectation::Independent {
        age: one_of(values, optional),
        sex: FieldRule::Absent,
    }
}

fn pairs(list: &[(Option<&str>, Option<&str>)]) -> SpeciesExpectation {
    SpeciesExpectation::Pairs {
        pairs: list
            .iter()
            .map(|(age, sex)| AgeSexPair {
                age: age.map(str::to_string),
                sex: sex.map(str::to_string),
            })
            .collect(),
    }
}

fn default_combinations() -> BTreeMap<String, SpeciesExpectation> {
    const ADULT_HARRIER: [(Option<&str>, Option<&str>); 7] = [
        (Some("J"), None),
        (Some("I"), Some("M")),
        (Some("A"), Some("M")),
        (Some("Non-Juv"), Some("M")),
        (Some("I"), Some("F")),
        (Some("A"), Some("F")),
        (Some("Non-Juv"), Some("F")),
    ];
    const RINGTAIL: [(Option<&str>, Option<&str>); 2] = [(None, Some("FC")), (None, None)];

    let ringtail_harrier: Vec<_> = ADULT_HARRIER.iter().chain(RINGTAIL.iter()).copied().collect();

    let mut table = BTreeMap::new();
    let mut put = |species: &str, expectation: SpeciesExpectation| {
        table.insert(species.to_string(), expectation);
    };

    for species in [
        "BK", "BK_JUV", "BK_NONJUV", "HB", "HB_JUV", "Roller", "StockD", "TurtleD", "WoodP",
        "large FALCON",
    ] {
        put(species, unaged());
    }

    for species in [
        "BlackV", "BlaStork", "DalPel", "DemCrane", "EuCrane", "GriffonV", "Lanner",
        "Large EAGLE", "Peregrine", "ShortTE", "StepBuz", "WhitePel",
    ] {
        put(species, aged(&ALL_AGES, true));
    }

    for species in [
        "EgyptianV", "GoldenE", "GreaterSE", "ImperialE", "LesserSE", "SakerF", "SteppeE",
        "WhiteTE",
    ] {
        put(species, aged(&ALL_AGES, false));
    }

    put("BootedE", aged(&["J", "Non-Juv"], true));
    put("WhiStork", aged(&["J", "A", "Non-Juv"], true));
    put(
        "CrestedHB",
        SpeciesExpectation::Independent {
            age: one_of(&["J", "A"], false),
            sex: one_of(&["M", "F"], false),
        },
    );
    put(
        "HB_NONJUV",
        SpeciesExpectation::Independent {
            age: FieldRule::Absent,
            sex: one_of(&["M", "F"], true),
        },
    );
    put(
        "Osprey",
        SpeciesExpectation::Independent {
            age: one_of(&ALL_AGES, true),
            sex: one_of(&["M", "F"], true),
        },
    );

    put("Hen", pairs(&ringtail_harrier));
    put("Marsh", pairs(&ringtail_harrier));
    put("Mon", pairs(&ADULT_HARRIER));
    put("Pal", pairs(&ADULT_HARRIER));
    put(
        "MonPalHen",
        pairs(&[
            (Some("J"), None),
            (Some("Non-Juv"), Some("M")),
            (Some("Non-Juv"), Some("F")),
            (None, Some("FC")),
            (None, None),
        ]),
    );

    table
}
