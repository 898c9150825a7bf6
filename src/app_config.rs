use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::providers::supadata::DEFAULT_ENDPOINT;
use crate::transcript::{AnnotationMode, SegmentationConfig};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "SUPADATA_API_KEY";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Paragraph segmentation thresholds
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Highlight annotation settings
    #[serde(default)]
    pub annotation: AnnotationConfig,

    /// Caption source settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Highlight annotation settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AnnotationConfig {
    /// Matching strategy (`spans` or `legacy`)
    #[serde(default)]
    pub mode: AnnotationMode,
}

/// Caption source provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceProvider {
    #[default]
    Supadata,
}

impl std::fmt::Display for SourceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Supadata => write!(f, "supadata"),
        }
    }
}

/// Caption source settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default)]
    pub provider: SourceProvider,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Language requested when none is given
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            provider: SourceProvider::default(),
            api_key: String::new(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            default_language: default_language(),
        }
    }
}

impl SourceConfig {
    /// API key from the config, or from the environment when empty
    pub fn resolved_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var(API_KEY_ENV).unwrap_or_default()
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_language() -> String {
    "auto".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .context(format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration, writing a default file first if none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();
        if path.exists() {
            return Ok((Self::from_file(path)?, false));
        }

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(path, config_json)
            .context(format!("Failed to write default config to file: {}", path.display()))?;

        Ok((config, true))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let seg = &self.segmentation;

        if !seg.pause_threshold_secs.is_finite() || seg.pause_threshold_secs < 0.0 {
            return Err(anyhow!(
                "Pause threshold must be a non-negative number of seconds, got {}",
                seg.pause_threshold_secs
            ));
        }

        if seg.max_paragraph_chars == 0 {
            return Err(anyhow!("Maximum paragraph length must be greater than zero"));
        }

        if seg.min_paragraph_chars > seg.max_paragraph_chars {
            return Err(anyhow!(
                "Minimum paragraph length ({}) exceeds maximum ({})",
                seg.min_paragraph_chars, seg.max_paragraph_chars
            ));
        }

        if self.source.timeout_secs == 0 {
            return Err(anyhow!("Source timeout must be greater than zero"));
        }

        crate::source_utils::validate_language(&self.source.default_language)
            .context("Invalid default caption language")?;

        Ok(())
    }
}
