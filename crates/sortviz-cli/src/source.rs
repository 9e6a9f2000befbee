//! Session inputs shared by `trace` and `play`.
//!
//! Resolution order: config file (or defaults), then `SORTVIZ_*` environment
//! overrides, then command-line flags. The merged result is validated once.

use std::path::PathBuf;

use clap::Args;
use sortviz_core::{Algorithm, Preset, parse_values};
use sortviz_runtime::VisualizerConfig;
use tracing::debug;

use crate::error::Result;

#[derive(Debug, Clone, Default, Args)]
pub struct ArrayArgs {
    /// Sorting algorithm (bubble or merge).
    #[arg(long, short = 'a')]
    pub algorithm: Option<Algorithm>,

    /// Explicit input, e.g. "5,3,8,1". Overrides generation.
    #[arg(long, conflicts_with = "preset")]
    pub values: Option<String>,

    /// Layout of generated arrays.
    #[arg(long)]
    pub preset: Option<Preset>,

    /// Generated array length.
    #[arg(long)]
    pub size: Option<usize>,

    /// Smallest generated value.
    #[arg(long = "min", allow_hyphen_values = true)]
    pub min_value: Option<i64>,

    /// Largest generated value.
    #[arg(long = "max", allow_hyphen_values = true)]
    pub max_value: Option<i64>,

    /// Seed for reproducible generation.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Auto-play interval in milliseconds.
    #[arg(long = "speed-ms")]
    pub speed_ms: Option<u64>,

    /// TOML or JSON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ArrayArgs {
    /// Merge file, environment and flags into a validated configuration.
    pub fn resolve(&self) -> Result<VisualizerConfig> {
        let mut config = match &self.config {
            Some(path) => VisualizerConfig::from_file(path)?,
            None => VisualizerConfig::default(),
        };
        config.apply_env_overrides();
        self.apply_to(&mut config)?;
        debug!(?config, "resolved configuration");
        Ok(config.validated()?)
    }

    fn apply_to(&self, config: &mut VisualizerConfig) -> Result<()> {
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(text) = &self.values {
            config.values = Some(parse_values(text)?);
        }
        if let Some(preset) = self.preset {
            config.preset = preset;
            config.values = None;
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(min_value) = self.min_value {
            config.min_value = min_value;
        }
        if let Some(max_value) = self.max_value {
            config.max_value = max_value;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(speed_ms) = self.speed_ms {
            config.speed_ms = speed_ms;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::CliError;
    use sortviz_core::InputError;

    #[test]
    fn flags_override_defaults() {
        let args = ArrayArgs {
            algorithm: Some(Algorithm::Merge),
            size: Some(8),
            seed: Some(3),
            ..ArrayArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.algorithm, Algorithm::Merge);
        assert_eq!(config.size, 8);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn values_are_parsed() {
        let args = ArrayArgs {
            values: Some("5, 3, 8, 1".into()),
            ..ArrayArgs::default()
        };
        assert_eq!(args.resolve().unwrap().values, Some(vec![5, 3, 8, 1]));
    }

    #[test]
    fn unparseable_values_are_input_errors() {
        let args = ArrayArgs {
            values: Some("a, b".into()),
            ..ArrayArgs::default()
        };
        assert!(matches!(
            args.resolve(),
            Err(CliError::Input(InputError::Empty))
        ));
    }

    #[test]
    fn invalid_flags_fail_validation() {
        let args = ArrayArgs {
            size: Some(500),
            ..ArrayArgs::default()
        };
        let error = args.resolve().unwrap_err();
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn preset_flag_replaces_file_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "values = [3, 2, 1]\nalgorithm = \"merge\"").unwrap();
        let args = ArrayArgs {
            preset: Some(Preset::Ascending),
            config: Some(file.path().to_path_buf()),
            ..ArrayArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.values, None);
        assert_eq!(config.preset, Preset::Ascending);
        assert_eq!(config.algorithm, Algorithm::Merge);
    }
}
