//! Engine configuration file support.
//!
//! This module provides utilities for reading engine configuration from
//! TOML configuration files. Everything has a default, so an absent file or
//! an empty one yields a fully usable configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::engine::score::ScoringWeights;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no engine.toml found in standard locations")]
    NotFound,
}

/// Engine configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: ScoringWeights,
    pub search: SearchSettings,
}

/// Search limits and behavior toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Number of ranked schedules to return.
    pub top_k: usize,
    /// Hard cap on explored leaf assignments per search.
    pub max_leaf_visits: usize,
    /// Optional wall-clock deadline for a search.
    pub timeout_ms: Option<u64>,
    /// Discard candidates with walking warnings instead of annotating them.
    pub strict_walking: bool,
    /// Fan first-level search branches out over worker tasks.
    pub parallel_branches: bool,
}

fn default_top_k() -> usize {
    5
}

fn default_max_leaf_visits() -> usize {
    20_000
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            top_k: default_top_k(),
            max_leaf_visits: default_max_leaf_visits(),
            timeout_ms: None,
            strict_walking: false,
            parallel_branches: true,
        }
    }
}

impl EngineConfig {
    /// Load engine configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: EngineConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load engine configuration from the default location.
    ///
    /// Searches for `engine.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = vec![
            PathBuf::from("engine.toml"),
            PathBuf::from("config/engine.toml"),
            PathBuf::from("../engine.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config.search.top_k, 5);
        assert_eq!(config.search.max_leaf_visits, 20_000);
        assert_eq!(config.search.timeout_ms, None);
        assert!(!config.search.strict_walking);
        assert!(config.search.parallel_branches);
        assert_eq!(config.weights, ScoringWeights::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[weights]
time_of_day = 30.0
instructor_rating = 10.0
easy_grading = 5.0
preferred_days = 10.0
back_to_back = 20.0
gap_shape = 5.0

[search]
top_k = 10
max_leaf_visits = 50000
timeout_ms = 2000
strict_walking = true
parallel_branches = false
"#;

        let config: EngineConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.weights.time_of_day, 30.0);
        assert_eq!(config.weights.back_to_back, 20.0);
        assert_eq!(config.search.top_k, 10);
        assert_eq!(config.search.max_leaf_visits, 50_000);
        assert_eq!(config.search.timeout_ms, Some(2000));
        assert!(config.search.strict_walking);
        assert!(!config.search.parallel_branches);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let toml = r#"
[search]
top_k = 3
"#;
        let config: EngineConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.search.top_k, 3);
        assert_eq!(config.search.max_leaf_visits, 20_000);
        assert_eq!(config.weights.time_of_day, 25.0);
    }
}
