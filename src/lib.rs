pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod fleet;
pub mod game;
pub mod high_scores;
pub mod lives;
pub mod scheduler;
pub mod scoreboard;

pub use config::GameConfig;
pub use error::{ConfigError, GameError, HighScoreError};
pub use game::GameManager;
