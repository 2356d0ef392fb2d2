//! Translation table backing [`Host::translate`](victim_stats_core::Host::translate).

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{HostError, Result};

const BUNDLED: &str = include_str!("../assets/strings.toml");

/// Translations keyed by language, then by string name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct StringTable {
    languages: HashMap<String, HashMap<String, String>>,
}

impl StringTable {
    /// The translations shipped with the host.
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| HostError::Parse {
            what: "strings",
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Overlay `other` on top of this table; its entries win.
    pub fn merge(&mut self, other: StringTable) {
        for (language, strings) in other.languages {
            self.languages.entry(language).or_default().extend(strings);
        }
    }

    pub fn get(&self, key: &str, language: &str) -> Option<&str> {
        self.languages
            .get(language)
            .and_then(|strings| strings.get(key))
            .map(String::as_str)
    }
}
