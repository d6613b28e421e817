use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;
use std::time::Duration;

use crate::file_utils::FileManager;
use crate::translation::BatchOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and deriving run options from the configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language of the input dataset (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// First target language (ISO)
    #[serde(default = "default_primary_language")]
    pub primary_language: String,

    /// Second target language (ISO)
    #[serde(default = "default_secondary_language")]
    pub secondary_language: String,

    /// Input and output file locations
    #[serde(default)]
    pub files: FilesConfig,

    /// Batching, flushing and pacing settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Translation endpoint settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// File locations
///
/// Empty output paths are derived from the input path and the language
/// codes, e.g. `data/part2.csv` -> `data/part2_ru.csv`.
///
/// Every file is UTF-8 encoded, on input and output.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FilesConfig {
    /// Input dataset CSV
    #[serde(default = "default_input_file")]
    pub input: PathBuf,

    /// Output for the first target language
    #[serde(default)]
    pub primary_output: Option<PathBuf>,

    /// Output for the second target language
    #[serde(default)]
    pub secondary_output: Option<PathBuf>,

    /// Output for rows that failed in either language
    #[serde(default)]
    pub errors_output: Option<PathBuf>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            input: default_input_file(),
            primary_output: None,
            secondary_output: None,
            errors_output: None,
        }
    }
}

/// Batch pipeline settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PipelineConfig {
    /// Rows per translation call
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Flush when the first language's row count is a multiple of this
    #[serde(default = "default_save_interval")]
    pub save_interval: usize,

    /// Minimum pause after each batch, in seconds
    #[serde(default = "default_pause_min_secs")]
    pub pause_min_secs: u64,

    /// Maximum pause after each batch, in seconds
    #[serde(default = "default_pause_max_secs")]
    pub pause_max_secs: u64,

    /// Pause between single-text calls after a batch call failed, in milliseconds
    #[serde(default = "default_fallback_pause_ms")]
    pub fallback_pause_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            save_interval: default_save_interval(),
            pause_min_secs: default_pause_min_secs(),
            pause_max_secs: default_pause_max_secs(),
            fallback_pause_ms: default_fallback_pause_ms(),
        }
    }
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google Translate web endpoint
    #[default]
    Google,
    // @provider: Offline mock that tags texts with the target language
    Mock,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::Mock => "Mock",
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation endpoint settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type
    #[serde(default, rename = "type")]
    pub provider_type: TranslationProvider,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Max chars per request
    #[serde(default = "default_max_chars_per_request")]
    pub max_chars_per_request: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: TranslationProvider::default(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            max_chars_per_request: default_max_chars_per_request(),
        }
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
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_primary_language() -> String {
    "ru".to_string()
}

fn default_secondary_language() -> String {
    "kk".to_string()
}

fn default_input_file() -> PathBuf {
    PathBuf::from("./data/input.csv")
}

fn default_batch_size() -> usize {
    50
}

fn default_save_interval() -> usize {
    1000
}

fn default_pause_min_secs() -> u64 {
    5
}

fn default_pause_max_secs() -> u64 {
    15
}

fn default_fallback_pause_ms() -> u64 {
    500
}

fn default_endpoint() -> String {
    crate::providers::google::DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_chars_per_request() -> usize {
    crate::providers::google::DEFAULT_MAX_CHARS
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        let _source_name = crate::language_utils::get_language_name(&self.source_language)?;
        let _primary_name = crate::language_utils::get_language_name(&self.primary_language)?;
        let _secondary_name = crate::language_utils::get_language_name(&self.secondary_language)?;

        if crate::language_utils::language_codes_match(&self.primary_language, &self.secondary_language) {
            return Err(anyhow!(
                "Target languages must differ, both are '{}'",
                self.primary_language
            ));
        }

        if self.pipeline.batch_size == 0 {
            return Err(anyhow!("Batch size must be greater than zero"));
        }

        if self.pipeline.save_interval == 0 {
            return Err(anyhow!("Save interval must be greater than zero"));
        }

        if self.pipeline.pause_min_secs > self.pipeline.pause_max_secs {
            return Err(anyhow!(
                "Minimum pause ({}s) exceeds maximum pause ({}s)",
                self.pipeline.pause_min_secs,
                self.pipeline.pause_max_secs
            ));
        }

        if self.provider.max_chars_per_request == 0 {
            return Err(anyhow!("Maximum characters per request must be greater than zero"));
        }

        let outputs = [self.primary_output(), self.secondary_output(), self.errors_output()];
        if outputs.iter().any(|p| *p == self.files.input)
            || outputs[0] == outputs[1]
            || outputs[0] == outputs[2]
            || outputs[1] == outputs[2]
        {
            return Err(anyhow!("Input and output files must all be distinct"));
        }

        Ok(())
    }

    /// Output path for the first target language
    pub fn primary_output(&self) -> PathBuf {
        self.files
            .primary_output
            .clone()
            .unwrap_or_else(|| FileManager::generate_output_path(&self.files.input, &self.primary_language))
    }

    /// Output path for the second target language
    pub fn secondary_output(&self) -> PathBuf {
        self.files
            .secondary_output
            .clone()
            .unwrap_or_else(|| FileManager::generate_output_path(&self.files.input, &self.secondary_language))
    }

    /// Output path for failed rows
    pub fn errors_output(&self) -> PathBuf {
        self.files
            .errors_output
            .clone()
            .unwrap_or_else(|| FileManager::generate_output_path(&self.files.input, "errors"))
    }

    /// Batch driver options derived from the pipeline settings
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            batch_size: self.pipeline.batch_size,
            save_interval: self.pipeline.save_interval,
            pause_min: Duration::from_secs(self.pipeline.pause_min_secs),
            pause_max: Duration::from_secs(self.pipeline.pause_max_secs),
            fallback_pause: Duration::from_millis(self.pipeline.fallback_pause_ms),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            primary_language: default_primary_language(),
            secondary_language: default_secondary_language(),
            files: FilesConfig::default(),
            pipeline: PipelineConfig::default(),
            provider: ProviderConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
