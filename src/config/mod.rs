//! # Configuration Management Module
//!
//! Game tunables, score storage location, logging and world selection,
//! loaded from a TOML file. Every section and field is optional; anything
//! left out falls back to the reference values.
//!
//! ## Configuration File Format
//!
//! ```toml
//! [game]
//! time_limit_secs = 300
//! encounter_chance = 0.3
//! spawn_policy = "easiest"
//!
//! [storage]
//! data_dir = "scores"
//! scores_file = "dungeon_puzzle_scores.txt"
//! max_high_scores = 10
//!
//! [logging]
//! level = "info"
//!
//! [world]
//! # catalog = "worlds/custom.json"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dungeon_puzzler::config::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     Config::create_default("dungeon.toml")?;
//!     let config = Config::load("dungeon.toml")?;
//!     println!("Time limit: {}s", config.game.time_limit_secs);
//!     Ok(())
//! }
//! ```

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::dungeon::combat::CombatRules;
use crate::dungeon::spawner::SpawnPolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub world: WorldConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub time_limit_secs: u64,
    /// Probability that entering a room triggers an encounter.
    pub encounter_chance: f64,
    pub escape_chance: f64,
    pub potion_item: String,
    pub potion_heal: i32,
    pub player_max_health: i32,
    pub player_attack: i32,
    /// Player bonus damage is drawn from `0..player_attack_variance`.
    pub player_attack_variance: u32,
    /// Enemy bonus damage is drawn from `0..enemy_attack_variance`.
    pub enemy_attack_variance: u32,
    pub points_per_difficulty: u32,
    pub time_bonus_per_minute: u32,
    pub spawn_policy: SpawnPolicy,
    /// Fixed RNG seed for a reproducible session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: 300,
            encounter_chance: 0.3,
            escape_chance: 0.5,
            potion_item: "potion".to_string(),
            potion_heal: 30,
            player_max_health: 100,
            player_attack: 15,
            player_attack_variance: 10,
            enemy_attack_variance: 5,
            points_per_difficulty: 50,
            time_bonus_per_minute: 50,
            spawn_policy: SpawnPolicy::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn combat_rules(&self) -> CombatRules {
        CombatRules {
            player_attack_variance: self.player_attack_variance,
            enemy_attack_variance: self.enemy_attack_variance,
            potion_item: self.potion_item.clone(),
            potion_heal: self.potion_heal,
            escape_chance: self.escape_chance,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub scores_file: String,
    pub max_high_scores: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "scores".to_string(),
            scores_file: "dungeon_puzzle_scores.txt".to_string(),
            max_high_scores: 10,
        }
    }
}

impl StorageConfig {
    pub fn scores_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.scores_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Append log records here instead of stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// JSON world catalog; the built-in dungeon is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
}

impl Config {
    /// Load and validate configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration file
    pub fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("game.encounter_chance", self.game.encounter_chance),
            ("game.escape_chance", self.game.escape_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                bail!("{} must be between 0 and 1 (got {})", name, value);
            }
        }
        if self.game.time_limit_secs == 0 {
            bail!("game.time_limit_secs must be greater than zero");
        }
        if self.game.player_max_health <= 0 {
            bail!("game.player_max_health must be positive");
        }
        if self.storage.max_high_scores == 0 {
            bail!("storage.max_high_scores must be greater than zero");
        }
        Ok(())
    }
}
