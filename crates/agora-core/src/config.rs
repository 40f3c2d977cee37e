//! Configuration loading and typed config structures for the Agora simulation.
//!
//! The canonical configuration lives in `agora-config.yaml` at the project
//! root. Every section and field is optional; anything missing takes the
//! default shown below.
//!
//! ```yaml
//! simulation:
//!   randomness: 0.3
//!   information_symmetry: 0.5
//!   resource_scarcity: 0.3
//!   max_ticks: 1000
//!   seed: 0
//! memory:
//!   short_term_capacity: 20
//!   promote_count: 5
//!   recall_limit: 10
//! emotion:
//!   decay_rate: 0.05
//!   surprise_decay_rate: 0.15
//! logging:
//!   level: info
//!   format: text
//! characters:
//!   - name: Ada
//!     traits: { openness: 0.8, conscientiousness: 0.6, extraversion: 0.4,
//!               agreeableness: 0.7, neuroticism: 0.2 }
//!     goals: ["build alliances for peace"]
//! ```

use std::path::Path;

use agora_agents::{CharacterSpec, EmotionConfig, MemoryConfig};
use agora_types::SimulationConfig;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration, mirroring `agora-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgoraConfig {
    /// Simulation knobs: randomness, symmetry, scarcity, tick limit, seed.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Memory capacities.
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Emotional decay rates.
    #[serde(default)]
    pub emotion: EmotionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Starting roster. Empty means the engine spawns a default roster.
    #[serde(default)]
    pub characters: Vec<CharacterSpec>,
}

impl AgoraConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Line format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}
