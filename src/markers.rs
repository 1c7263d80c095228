//! Comment-marker registry.
//!
//! Maps a language name to the line-comment prefixes that introduce the
//! title and description lines of a snippet. Lookup is an exact,
//! case-sensitive match on the language; anything unlisted gets the
//! default prefix list.

use std::collections::HashMap;

use crate::config::MarkersConfig;

/// Built-in language table. Config entries are merged over it.
const BUILTIN_MARKERS: &[(&str, &[&str])] = &[
    ("SQL", &["--"]),
    ("C#", &["//"]),
    ("M68K", &[";", "*"]),
];

#[derive(Debug, Clone)]
pub struct MarkerRegistry {
    table: HashMap<String, Vec<String>>,
    default: Vec<String>,
}

impl MarkerRegistry {
    pub fn new(table: HashMap<String, Vec<String>>, default: Vec<String>) -> Self {
        Self { table, default }
    }

    /// Built-in table with `config` entries layered on top.
    pub fn from_config(config: &MarkersConfig) -> Self {
        let mut registry = Self::default();
        for (language, markers) in &config.languages {
            registry.table.insert(language.clone(), markers.clone());
        }
        registry.default = config.default.clone();
        registry
    }

    /// Ordered marker list for `language`. Never fails.
    pub fn markers_for(&self, language: &str) -> &[String] {
        self.table
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or(self.default.as_slice())
    }
}

impl Default for MarkerRegistry {
    fn default() -> Self {
        let table = BUILTIN_MARKERS
            .iter()
            .map(|(language, markers)| {
                (
                    language.to_string(),
                    markers.iter().map(|m| m.to_string()).collect(),
                )
            })
            .collect();
        Self::new(table, vec!["#".to_string()])
    }
}
