//! Settings loaded from TOML.
//!
//! - `parse_settings_toml(toml_content)` reads a custom document
//! - `Settings::default()` is the embedded `default_settings.toml`
//! - Values are plain data; callers build tables and validators from them

use serde::Deserialize;

use crate::romaji::RomajiOptions;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub romaji: RomajiSettings,
    pub matching: MatchSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RomajiSettings {
    pub alternate_spellings: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MatchSettings {
    pub fuzzy: bool,
    pub threshold: u8,
}

impl Settings {
    pub fn romaji_options(&self) -> RomajiOptions {
        RomajiOptions {
            alternate_spellings: self.romaji.alternate_spellings,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("settings TOML must be valid")
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.matching.threshold > 100 {
        return Err(SettingsError::InvalidValue {
            field: "matching.threshold".to_string(),
            reason: "must be between 0 and 100".to_string(),
        });
    }
    Ok(())
}
