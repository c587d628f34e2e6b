// Configuration module for reading Snake.toml
// Holds the tunable parameters of the move selector and the service around it

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub evaluation: EvaluationConfig,
    pub game_rules: GameRulesConfig,
    pub selection: SelectionConfig,
    pub appearance: AppearanceConfig,
    pub debug: DebugConfig,
}

/// Weights of the static positional heuristic
///
/// score = health_weight * health
///       - food_distance_weight * nearest food distance
///       - enemy_distance_weight * nearest enemy head distance
#[derive(Debug, Deserialize, Clone)]
pub struct EvaluationConfig {
    pub health_weight: f64,
    pub food_distance_weight: f64,
    pub enemy_distance_weight: f64,
}

/// Game rules used when projecting a candidate move one step ahead
#[derive(Debug, Deserialize, Clone)]
pub struct GameRulesConfig {
    pub health_on_food: i32,
    pub health_loss_per_turn: i32,
}

/// Random source for the safe-move fallback
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SelectionConfig {
    /// When set, each turn draws from a generator seeded with `rng_seed ^ turn`
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

/// Appearance returned from GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
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

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            evaluation: EvaluationConfig {
                health_weight: 0.5,
                food_distance_weight: 0.2,
                enemy_distance_weight: 0.3,
            },
            game_rules: GameRulesConfig {
                health_on_food: 100,
                health_loss_per_turn: 1,
            },
            selection: SelectionConfig { rng_seed: None },
            appearance: AppearanceConfig {
                author: "Group9".to_string(),
                color: "#355e3b".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
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
