//! Error types for the simulation core and its file-backed collaborators.

use thiserror::Error;

/// Failures raised by the game model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// The playfield must have a positive, finite height and width.
    #[error("invalid background dimensions: height {height}, width {width}")]
    InvalidDimensions { height: f64, width: f64 },

    /// A life was requested from an exhausted pool.
    #[error("there are no more lives")]
    NoLivesRemaining,
}

/// Failures loading or saving a `GameConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failures reading or writing the high-score file.
#[derive(Error, Debug)]
pub enum HighScoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed high-score record on line {line}: {content:?}")]
    Malformed { line: usize, content: String },
}
