//! Running score.  Only ever grows.

/// Flat award for shooting down the bonus ship.
pub const BONUS_SHIP_POINTS: u32 = 10_000;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Award `(level + 1) × 100` for a kill.  Level 0 awards nothing.
    pub fn increase_score(&mut self, level: u32) {
        if level > 0 {
            self.score = self
                .score
                .saturating_add(level.saturating_add(1).saturating_mul(100));
        }
    }

    pub fn award_bonus(&mut self) {
        self.score = self.score.saturating_add(BONUS_SHIP_POINTS);
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}
