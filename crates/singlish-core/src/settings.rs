//! Global settings loaded from TOML, following the same OnceLock pattern as the
//! mapping table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub tokenizer: TokenizerSettings,
    pub mapper: MapperSettings,
    pub gate: GateSettings,
    pub converter: ConverterSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenizerSettings {
    pub punctuation_run_min: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapperSettings {
    pub fold_case: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GateSettings {
    pub symbol_density_threshold: f64,
    pub repetition_min_run: usize,
    pub case_anomaly_min_letters: usize,
    pub joined_word_min_len: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConverterSettings {
    pub max_input_chars: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_at_least {
        ($min:expr, $section:ident . $field:ident) => {
            if s.$section.$field < $min {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: format!("must be at least {}", $min),
                });
            }
        };
    }

    check_at_least!(2, tokenizer.punctuation_run_min);
    check_at_least!(2, gate.repetition_min_run);
    check_at_least!(1, gate.case_anomaly_min_letters);
    check_at_least!(2, gate.joined_word_min_len);
    check_at_least!(1, converter.max_input_chars);

    let t = s.gate.symbol_density_threshold;
    if !(t > 0.0 && t <= 1.0) {
        return Err(SettingsError::InvalidValue {
            field: "gate.symbol_density_threshold".to_string(),
            reason: "must be in (0, 1]".to_string(),
        });
    }

    Ok(())
}
