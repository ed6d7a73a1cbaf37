//! Flat-file high-score table.
//!
//! One record per line, `name<TAB>score<TAB>level`.  Records are kept in
//! ascending score order and only the best `MAX_HIGH_SCORES` survive.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::HighScoreError;

pub const MAX_HIGH_SCORES: usize = 10;
const DEFAULT_NAME: &str = "Anonymous";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedPlayer {
    pub name: String,
    pub score: u32,
    /// Wave reached.
    pub level: u32,
}

impl RankedPlayer {
    /// Tabs and newlines would break the record format, so they become spaces.
    /// An empty name is recorded as "Anonymous".
    pub fn new(name: &str, score: u32, level: u32) -> Self {
        let name: String = name
            .trim()
            .chars()
            .map(|c| if c == '\t' || c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        let name = if name.is_empty() { DEFAULT_NAME.to_string() } else { name };
        RankedPlayer { name, score, level }
    }

    fn parse(line_number: usize, line: &str) -> Result<Self, HighScoreError> {
        let malformed = || HighScoreError::Malformed {
            line: line_number,
            content: line.to_string(),
        };
        let mut fields = line.split('\t');
        let (Some(name), Some(score), Some(level), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed());
        };
        let score = score.trim().parse().map_err(|_| malformed())?;
        let level = level.trim().parse().map_err(|_| malformed())?;
        Ok(RankedPlayer::new(name, score, level))
    }
}

impl fmt::Display for RankedPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.score)
    }
}

#[derive(Clone, Debug)]
pub struct HighScoreBoard {
    path: PathBuf,
    entries: Vec<RankedPlayer>,
}

impl HighScoreBoard {
    /// An empty board that will be written to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        HighScoreBoard {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Read the board stored at `path`.  A missing file is an empty board.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, HighScoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => contents
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(i, line)| RankedPlayer::parse(i + 1, line))
                .collect::<Result<Vec<_>, _>>()?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("read {} high scores from {}", entries.len(), path.display());
        let mut board = HighScoreBoard { path, entries };
        board.sort_and_trim();
        Ok(board)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ascending by score.
    pub fn entries(&self) -> &[RankedPlayer] {
        &self.entries
    }

    pub fn best(&self) -> Option<&RankedPlayer> {
        self.entries.last()
    }

    /// Whether `score` would make it onto the board.
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < MAX_HIGH_SCORES
            || self.entries.first().map_or(true, |lowest| score > lowest.score)
    }

    pub fn add(&mut self, player: RankedPlayer) {
        info!("recording high score {} (wave {})", player, player.level);
        self.entries.push(player);
        self.sort_and_trim();
    }

    pub fn save(&self) -> Result<(), HighScoreError> {
        let contents: String = self
            .entries
            .iter()
            .map(|p| format!("{}\t{}\t{}\n", p.name, p.score, p.level))
            .collect();
        std::fs::write(&self.path, contents)?;
        debug!("wrote {} high scores to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    fn sort_and_trim(&mut self) {
        // Stable: among equal scores the earlier record ranks lower.
        self.entries.sort_by_key(|p| p.score);
        let excess = self.entries.len().saturating_sub(MAX_HIGH_SCORES);
        self.entries.drain(..excess);
    }
}
