use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::GedtreeError;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub graph: GraphConfig,
}

/// Process-wide settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Where the GEDCOM file comes from when `--file` is not given
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub default_file: Option<PathBuf>,
}

/// Traversal limits for the relationship queries
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    /// Deepest generation any chart or ancestor walk may reach.
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_generations: default_max_generations(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_generations() -> usize {
    crate::graph::DEFAULT_MAX_GENERATIONS
}

const CONFIG_ENV: &str = "GEDTREE_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "gedtree.toml";

impl Config {
    /// Load configuration
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in GEDTREE_CONFIG environment variable (must exist)
    /// 2. ./gedtree.toml in current directory
    /// 3. Built-in defaults
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();

        let config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                if local.is_file() {
                    Self::from_file(&local)?
                } else {
                    Config::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse a specific config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.graph.max_generations == 0 {
            return Err(GedtreeError::Config(
                "graph.max_generations must be greater than 0".to_string(),
            )
            .into());
        }

        if !matches!(
            self.general.log_level.as_str(),
            "error" | "warn" | "info" | "debug" | "trace"
        ) {
            return Err(GedtreeError::Config(format!(
                "general.log_level must be one of error, warn, info, debug, trace (got {})",
                self.general.log_level
            ))
            .into());
        }

        Ok(())
    }

    /// GEDCOM file to use: an explicit path wins over the configured default
    pub fn input_file(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.input.default_file.clone())
            .context("No GEDCOM file given. Pass --file or set input.default_file in gedtree.toml.")
    }
}
