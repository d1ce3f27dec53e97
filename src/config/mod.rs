//! Configuration management for imgai
//!
//! Everything a command needs is carried in explicit structs. Nothing here is
//! global: `main` builds a [`Config`] (defaults, then an optional file, then
//! command-line overrides) and hands the relevant pieces to each command.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::error::{Result, ImgaiError};
use crate::processing::formats::ImageFormat;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Batch processor settings
    pub processing: ProcessingConfig,

    /// Output defaults for encoders
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Message language (`en`, `ja`); `IMGAI_LANG` wins when set
    pub language: Option<String>,
}

/// Settings for one batch processor invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of parallel workers
    pub workers: usize,

    /// Show a progress bar for multi-file batches
    pub show_progress: bool,
}

impl ProcessingConfig {
    /// Worker count used when none (or zero) is requested
    pub const DEFAULT_WORKERS: usize = 4;

    /// Build a config for `workers` workers, substituting the default for zero
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
        .normalized()
    }

    /// Replace a zero worker count with the default
    pub fn normalized(mut self) -> Self {
        if self.workers == 0 {
            self.workers = Self::DEFAULT_WORKERS;
        }
        self
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            workers: Self::DEFAULT_WORKERS,
            show_progress: true,
        }
    }
}

/// Encoder defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JPEG quality used when `--quality` is not given (1-100)
    pub default_quality: u8,

    /// Format used by `convert` when `--format` is not given
    pub default_format: Option<ImageFormat>,
}

impl OutputConfig {
    pub const DEFAULT_QUALITY: u8 = 90;
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_quality: Self::DEFAULT_QUALITY,
            default_format: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON logging
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ImgaiError::config(
                format!("Failed to read config file {:?}: {}", path.as_ref(), e)
            ))?;

        match config_extension(path.as_ref()).as_str() {
            "toml" => toml::from_str(&content).map_err(Into::into),
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(Into::into),
            _ => Err(ImgaiError::config(
                "Unsupported config file format. Use .toml or .yaml"
            )),
        }
    }

    /// Load from `path` if given, otherwise fall back to defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.output.default_quality == 0 || self.output.default_quality > 100 {
            return Err(ImgaiError::config(format!(
                "default_quality must be between 1 and 100, got {}",
                self.output.default_quality
            )));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ImgaiError::config("Log level must not be empty"));
        }

        Ok(())
    }
}

fn config_extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.processing.workers, 4);
        assert!(config.processing.show_progress);
        assert_eq!(config.output.default_quality, 90);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_normalized() {
        assert_eq!(ProcessingConfig::with_workers(0).workers, 4);
        assert_eq!(ProcessingConfig::with_workers(7).workers, 7);

        let raw = ProcessingConfig { workers: 0, show_progress: false };
        let fixed = raw.normalized();
        assert_eq!(fixed.workers, ProcessingConfig::DEFAULT_WORKERS);
        assert!(!fixed.show_progress);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: Config = toml::from_str("[processing]\nworkers = 8\n").unwrap();
        assert_eq!(parsed.processing.workers, 8);
        assert!(parsed.processing.show_progress);
        assert_eq!(parsed.output.default_quality, 90);
        assert_eq!(parsed.logging.level, "warn");
    }

    #[test]
    fn test_config_file_io() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.processing.workers = 2;
        config.output.default_format = Some(ImageFormat::Png);

        let toml_path = dir.path().join("imgai.toml");
        std::fs::write(&toml_path, toml::to_string_pretty(&config).unwrap()).unwrap();
        let loaded = Config::from_file(&toml_path).unwrap();
        assert_eq!(loaded.processing.workers, 2);
        assert_eq!(loaded.output.default_format, Some(ImageFormat::Png));

        let yaml_path = dir.path().join("imgai.yaml");
        std::fs::write(&yaml_path, serde_yaml::to_string(&config).unwrap()).unwrap();
        assert!(Config::load(Some(&yaml_path)).is_ok());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("imgai.ini");
        std::fs::write(&path, "workers=2").unwrap();
        assert!(matches!(Config::from_file(&path), Err(ImgaiError::Config { .. })));
    }

    #[test]
    fn test_invalid_quality_rejected() {
        let mut config = Config::default();
        config.output.default_quality = 0;
        assert!(config.validate().is_err());
    }
}
