//! Game configuration, loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Period of the simulation tick in milliseconds.
    pub tick_interval_ms: u64,

    /// Playfield size in game units.
    pub background_width: f64,
    pub background_height: f64,

    /// Spare lives per wave.
    pub starting_lives: u32,

    /// Rows in the first wave's fleet.
    pub fleet_levels: u32,

    /// Last wave; clearing it wins the game.
    pub wave_cap: u32,

    /// Bullets one side may have in flight at once.
    pub ammo_cap: usize,

    /// Per-tick probability that the bonus ship appears.
    pub bonus_spawn_chance: f64,

    /// High-score file.  `None` means `$HOME/.space_invaders_scores`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_score_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 25,
            background_width: 1080.0,
            background_height: 720.0,
            starting_lives: 3,
            fleet_levels: 4,
            wave_cap: 3,
            ammo_cap: 3,
            bonus_spawn_chance: 0.002,
            high_score_file: None,
        }
    }
}

impl GameConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn high_score_path(&self) -> PathBuf {
        self.high_score_file.clone().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".space_invaders_scores")
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse as TOML but cannot drive a game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chance = self.bonus_spawn_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(ConfigError::Invalid {
                field: "bonus_spawn_chance",
                reason: format!("{chance} is not a probability in [0, 1]"),
            });
        }
        for (field, value) in [
            ("background_width", self.background_width),
            ("background_height", self.background_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is not a positive size"),
                });
            }
        }
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path.as_ref(), contents)?;
        Ok(())
    }

    /// Load `path`, falling back to defaults when it does not exist.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::load(path)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }
}
