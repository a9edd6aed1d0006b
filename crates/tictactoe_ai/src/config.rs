//! Engine configuration.

use crate::search::{Searcher, Strategy};
use crate::types::Mark;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Which marks the players use and how the AI searches.
///
/// X always moves first, so `human_mark = "O"` lets the AI open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Mark played by the engine.
    #[serde(default = "default_ai_mark")]
    ai_mark: Mark,

    /// Mark played by the human.
    #[serde(default = "default_human_mark")]
    human_mark: Mark,

    /// Tree walking strategy.
    #[serde(default)]
    strategy: Strategy,
}

fn default_ai_mark() -> Mark {
    Mark::O
}

fn default_human_mark() -> Mark {
    Mark::X
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ai_mark: default_ai_mark(),
            human_mark: default_human_mark(),
            strategy: Strategy::default(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(ai_mark = %config.ai_mark, strategy = %config.strategy, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the two players use different marks.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ai_mark == self.human_mark {
            return Err(ConfigError::new(format!(
                "ai_mark and human_mark must differ (both are {})",
                self.ai_mark
            )));
        }
        Ok(())
    }

    /// Builds the searcher for this configuration.
    pub fn searcher(&self) -> Searcher {
        Searcher::new(self.strategy)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
