//! Trektellen station ids and the names used in checked output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

fn default_names() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("1047".to_string(), "1. Sakhalvasho".to_string()),
        ("1048".to_string(), "2. Shuamta".to_string()),
    ])
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationsConfig {
    /// Telpost id → station name.
    #[serde(default = "default_names")]
    pub names: BTreeMap<String, String>,
}

impl Default for StationsConfig {
    fn default() -> Self {
        Self {
            names: default_names(),
        }
    }
}

impl StationsConfig {
    /// Station name for a raw telpost id. Unknown ids are returned as given.
    #[must_use]
    pub fn resolve<'a>(&'a self, telpost: &'a str) -> &'a str {
        self.names
            .get(telpost.trim())
            .map_or(telpost, String::as_str)
    }
}
