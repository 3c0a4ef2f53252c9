// Configuration module for reading Snake.toml
// Appearance and strategy settings loaded once at startup

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::Direction;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub appearance: AppearanceConfig,
    pub strategy: StrategyConfig,
    pub debug: DebugConfig,
}

/// Values returned from GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub apiversion: String,
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
    pub version: String,
}

/// Move-decision tuning
#[derive(Debug, Deserialize, Clone)]
pub struct StrategyConfig {
    /// Occupied neighbours (out of 4) at which a destination counts as a tunnel
    pub tunnel_wall_threshold: usize,
    /// Free cells are divided by this to get the target body length
    pub target_length_divisor: usize,
    pub seek_food: bool,
    /// Move returned when every direction has been filtered out
    pub fallback_move: String,
}

impl StrategyConfig {
    /// Parses `fallback_move`, defaulting to down when it is not a direction
    pub fn fallback_direction(&self) -> Direction {
        self.fallback_move.parse().unwrap_or(Direction::Down)
    }
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.strategy.target_length_divisor == 0 {
            return Err("strategy.target_length_divisor must be at least 1".to_string());
        }
        if self.strategy.tunnel_wall_threshold > 4 {
            return Err(format!(
                "strategy.tunnel_wall_threshold must be between 0 and 4, got {}",
                self.strategy.tunnel_wall_threshold
            ));
        }
        self.strategy
            .fallback_move
            .parse::<Direction>()
            .map_err(|e| format!("strategy.fallback_move: {}", e))?;
        Ok(())
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            appearance: AppearanceConfig {
                apiversion: "1".to_string(),
                author: "Adrian".to_string(),
                color: "#0044ff".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            strategy: StrategyConfig {
                tunnel_wall_threshold: 3,
                target_length_divisor: 2,
                seek_food: true,
                fallback_move: "down".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
