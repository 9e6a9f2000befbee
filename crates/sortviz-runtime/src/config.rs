#![forbid(unsafe_code)]

//! Visualizer configuration as data.
//!
//! [`VisualizerConfig`] captures the session parameters (algorithm, array
//! shape, playback speed, seed) and can be loaded from TOML or JSON at
//! startup. Every field has a default, so a partial file only overrides what
//! it names.
//!
//! # Loading
//!
//! ```toml
//! # sortviz.toml
//! algorithm = "merge"
//! size = 20
//! speed_ms = 150
//! seed = 42
//! ```
//!
//! ```rust,ignore
//! let config = VisualizerConfig::from_toml_file("sortviz.toml")?;
//! let config = VisualizerConfig::from_json_str(json)?;
//! ```
//!
//! # Environment
//!
//! `SORTVIZ_SEED`, `SORTVIZ_SPEED_MS` and `SORTVIZ_SIZE` override the loaded
//! values. Unparseable values are ignored with a warning.

use std::env;
use std::path::Path;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use sortviz_core::generator::{
    DEFAULT_ARRAY_SIZE, DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE, MAX_ARRAY_SIZE, MIN_ARRAY_SIZE,
    range_len,
};
use sortviz_core::{Algorithm, Element, MAX_CUSTOM_ELEMENTS, Preset, elements_from_values};
use thiserror::Error;
use tracing::warn;

use crate::player::{DEFAULT_SPEED, MAX_SPEED, MIN_SPEED, Player};

pub const ENV_SEED: &str = "SORTVIZ_SEED";
pub const ENV_SPEED_MS: &str = "SORTVIZ_SPEED_MS";
pub const ENV_SIZE: &str = "SORTVIZ_SIZE";

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub algorithm: Algorithm,
    /// How generated arrays are laid out.
    pub preset: Preset,
    /// Generated array length.
    pub size: usize,
    pub min_value: i64,
    pub max_value: i64,
    /// Auto-play interval in milliseconds.
    pub speed_ms: u64,
    /// Seed for reproducible generation; thread RNG when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Explicit input; replaces generation when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<i64>>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            preset: Preset::default(),
            size: DEFAULT_ARRAY_SIZE,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            speed_ms: duration_ms(DEFAULT_SPEED),
            seed: None,
            values: None,
        }
    }
}

impl VisualizerConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load by extension: `.json` as JSON, anything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }

    /// Resolve the effective configuration: file (or defaults), then
    /// environment overrides, then validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validated()
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Apply `SORTVIZ_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_with(&env_get);
    }

    fn apply_env_overrides_with<F: Fn(&str) -> Option<String>>(&mut self, get: &F) {
        if let Some(seed) = env_parse_with::<u64, _>(ENV_SEED, get) {
            self.seed = Some(seed);
        }
        if let Some(speed_ms) = env_parse_with::<u64, _>(ENV_SPEED_MS, get) {
            self.speed_ms = speed_ms;
        }
        if let Some(size) = env_parse_with::<usize, _>(ENV_SIZE, get) {
            self.size = size;
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Some(values) = &self.values {
            if values.is_empty() {
                errors.push("values must not be empty".into());
            }
            if values.len() > MAX_CUSTOM_ELEMENTS {
                errors.push(format!(
                    "values must hold at most {MAX_CUSTOM_ELEMENTS} elements, got {}",
                    values.len()
                ));
            }
            // Generation parameters are unused with explicit values.
        } else {
            if !(MIN_ARRAY_SIZE..=MAX_ARRAY_SIZE).contains(&self.size) {
                errors.push(format!(
                    "size must be in {MIN_ARRAY_SIZE}..={MAX_ARRAY_SIZE}, got {}",
                    self.size
                ));
            }
            if self.min_value >= self.max_value {
                errors.push(format!(
                    "min_value must be < max_value, got {} >= {}",
                    self.min_value, self.max_value
                ));
            } else if self.preset == Preset::Distinct
                && self.size > range_len(self.min_value, self.max_value)
            {
                errors.push(format!(
                    "size {} exceeds the {} distinct values in [{}, {}]",
                    self.size,
                    range_len(self.min_value, self.max_value),
                    self.min_value,
                    self.max_value
                ));
            }
        }

        let (min_ms, max_ms) = (duration_ms(MIN_SPEED), duration_ms(MAX_SPEED));
        if !(min_ms..=max_ms).contains(&self.speed_ms) {
            errors.push(format!(
                "speed_ms must be in {min_ms}..={max_ms}, got {}",
                self.speed_ms
            ));
        }

        errors
    }

    /// `self` if [`validate`](Self::validate) is clean.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    #[must_use]
    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    /// Build the input array: explicit values if set, else the preset.
    ///
    /// With a seed the result is reproducible.
    #[must_use]
    pub fn input_elements(&self) -> Vec<Element> {
        if let Some(values) = &self.values {
            return elements_from_values(values);
        }
        match self.seed {
            Some(seed) => self.preset.generate(
                self.size,
                self.min_value,
                self.max_value,
                &mut StdRng::seed_from_u64(seed),
            ),
            None => self
                .preset
                .generate(self.size, self.min_value, self.max_value, &mut rand::rng()),
        }
    }

    /// A paused player over [`input_elements`](Self::input_elements).
    #[must_use]
    pub fn player(&self) -> Player {
        Player::new(self.algorithm, self.input_elements()).with_speed(self.speed())
    }
}

fn env_get(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn env_parse_with<T, F>(name: &str, get: &F) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = get(name)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(name, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[source] std::io::Error),
    #[error("config TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),
    #[error("config JSON parse error: {0}")]
    Json(#[source] serde_json::Error),
    #[error("invalid config: {}", .0.join("; "))]
    Validation(Vec<String>),
}
