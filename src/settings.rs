//! Runtime tunables for candidate search, typo repair, and smoothing.
//!
//! The TOML document embedded at build time supplies the defaults; a caller
//! may install its own document with `init_custom` before the first
//! `settings()` call. After that the parsed singleton is fixed for the
//! process lifetime, the same OnceLock discipline the compiled morphology
//! templates use.

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Installs a custom TOML document. Validates it eagerly and fails with
/// `AlreadyInitialized` when called twice or after `settings()` ran.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    if CUSTOM_TOML.set(toml_content).is_err() {
        return Err(SettingsError::AlreadyInitialized);
    }
    Ok(())
}

/// Process-wide settings, parsed on first access.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let document = match CUSTOM_TOML.get() {
            Some(custom) => custom.as_str(),
            None => DEFAULT_SETTINGS_TOML,
        };
        parse_settings_toml(document).expect("settings TOML must be valid")
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings TOML did not parse: {0}")]
    Parse(String),
    #[error("bad value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings were already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub candidates: CandidateSettings,
    pub morphology: MorphologySettings,
    pub language_model: LanguageModelSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateSettings {
    pub max_edit_distance: usize,
    pub jaro_threshold_long: f64,
    pub jaro_threshold_short: f64,
    pub short_word_len: usize,
}

impl CandidateSettings {
    /// Jaro-Winkler floor for a dictionary word of the given length.
    pub fn jaro_threshold_for(&self, word_len: usize) -> f64 {
        if word_len > self.short_word_len {
            self.jaro_threshold_long
        } else {
            self.jaro_threshold_short
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MorphologySettings {
    pub typo_edit_distance: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageModelSettings {
    pub zero_count_discount: f64,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let parsed: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&parsed)?;
    Ok(parsed)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    let thresholds = [
        (
            "candidates.jaro_threshold_long",
            s.candidates.jaro_threshold_long,
        ),
        (
            "candidates.jaro_threshold_short",
            s.candidates.jaro_threshold_short,
        ),
    ];
    for (field, value) in thresholds {
        if !(value > 0.0 && value <= 1.0) {
            return Err(SettingsError::InvalidValue {
                field: field.to_string(),
                reason: "must lie in (0, 1]".to_string(),
            });
        }
    }
    if s.language_model.zero_count_discount <= 0.0 {
        return Err(SettingsError::InvalidValue {
            field: "language_model.zero_count_discount".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}
