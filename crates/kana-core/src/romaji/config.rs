use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

/// Longest romaji token the engine will scan for (`xtsu`).
pub const MAX_TOKEN_LEN: usize = 4;

#[derive(Deserialize)]
struct RomajiDocument {
    mappings: BTreeMap<String, String>,
    #[serde(default)]
    alternates: BTreeMap<String, String>,
}

/// Validated contents of a romaji TOML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomajiMappings {
    /// Canonical spellings, one per kana. Used in both directions.
    pub canonical: BTreeMap<String, String>,
    /// Additional input spellings. Never produced by reverse conversion.
    pub alternates: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RomajiConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("non-ASCII key: {0}")]
    NonAsciiKey(String),
    #[error("key {0:?} must be 1 to {MAX_TOKEN_LEN} characters")]
    KeyLength(String),
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("kana {kana} is mapped by both {first} and {second}")]
    DuplicateKana {
        kana: String,
        first: String,
        second: String,
    },
    #[error("alternate {0} shadows a canonical mapping")]
    ShadowedAlternate(String),
}

/// Parse TOML text into canonical and alternate mappings.
pub fn parse_romaji_toml(toml_str: &str) -> Result<RomajiMappings, RomajiConfigError> {
    let doc: RomajiDocument =
        toml::from_str(toml_str).map_err(|e| RomajiConfigError::Parse(e.to_string()))?;

    if doc.mappings.is_empty() {
        return Err(RomajiConfigError::Empty);
    }

    for (key, value) in doc.mappings.iter().chain(&doc.alternates) {
        check_entry(key, value)?;
    }

    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (key, value) in &doc.mappings {
        if let Some(first) = seen.insert(value.as_str(), key.as_str()) {
            return Err(RomajiConfigError::DuplicateKana {
                kana: value.clone(),
                first: first.to_string(),
                second: key.clone(),
            });
        }
    }

    if let Some(key) = doc.alternates.keys().find(|k| doc.mappings.contains_key(*k)) {
        return Err(RomajiConfigError::ShadowedAlternate(key.clone()));
    }

    Ok(RomajiMappings {
        canonical: doc.mappings,
        alternates: doc.alternates,
    })
}

fn check_entry(key: &str, value: &str) -> Result<(), RomajiConfigError> {
    if !key.is_ascii() {
        return Err(RomajiConfigError::NonAsciiKey(key.to_string()));
    }
    if key.is_empty() || key.len() > MAX_TOKEN_LEN {
        return Err(RomajiConfigError::KeyLength(key.to_string()));
    }
    if value.is_empty() {
        return Err(RomajiConfigError::EmptyValue(key.to_string()));
    }
    Ok(())
}
