//! Pool of pre-built player ships.
//!
//! The queue holds `requested + 2` ships: the one currently in use at the
//! front, one per spare life, and a permanent buffer unit at the back that is
//! never handed out.

use std::collections::VecDeque;

use crate::entities::{Ship, ShipKind};
use crate::error::GameError;

/// Ship in use plus the buffer unit.
const RESERVED_SHIPS: usize = 2;

#[derive(Clone, Debug)]
pub struct LivesPool {
    ships: VecDeque<Ship>,
}

impl LivesPool {
    /// `requested` below 1 is treated as 1.
    pub fn new(requested: u32) -> Self {
        let requested = requested.max(1) as usize;
        let ships = (0..requested + RESERVED_SHIPS)
            .map(|_| Ship::new(ShipKind::Player))
            .collect();
        LivesPool { ships }
    }

    /// The ship currently in use.
    pub fn current(&self) -> Option<&Ship> {
        self.ships.front()
    }

    /// Spend a life: the ship in use is discarded and the next one returned.
    pub fn use_life(&mut self) -> Result<Ship, GameError> {
        if !self.has_lives_remaining() {
            return Err(GameError::NoLivesRemaining);
        }
        self.ships.pop_front();
        self.ships
            .front()
            .cloned()
            .ok_or(GameError::NoLivesRemaining)
    }

    pub fn has_lives_remaining(&self) -> bool {
        self.ships.len() > RESERVED_SHIPS
    }

    /// Spare lives left, excluding the ship in use and the buffer.
    pub fn lives_count(&self) -> u32 {
        self.ships.len().saturating_sub(RESERVED_SHIPS) as u32
    }
}
