//! The enemy formation: one row per level, row `i` minted with `2 × i` ships.
//! Ships only ever leave the fleet; a new wave builds a new `Fleet`.

use crate::entities::{Ship, ShipId, ShipKind};

/// Levels at or above this may shoot.
pub const FIRING_LEVEL: u32 = 3;

const SHIPS_PER_LEVEL_MULTIPLIER: usize = 2;

#[derive(Clone, Debug)]
pub struct Fleet {
    rows: Vec<Vec<Ship>>,
}

impl Fleet {
    /// Build `levels` rows.  Anything below 1 is treated as 1.
    pub fn new(levels: u32) -> Self {
        let levels = levels.max(1);
        let rows = (1..=levels)
            .map(|level| {
                (0..Self::ship_count_for_level(level))
                    .map(|_| Ship::new(ShipKind::enemy(level)))
                    .collect()
            })
            .collect();
        Fleet { rows }
    }

    /// Formation size of a row, not its live count.
    pub fn ship_count_for_level(level: u32) -> usize {
        SHIPS_PER_LEVEL_MULTIPLIER * level as usize
    }

    pub fn amount_of_levels(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Every live ship, row order then position within the row.
    pub fn all_ships(&self) -> impl Iterator<Item = &Ship> {
        self.rows.iter().flatten()
    }

    pub fn all_ships_mut(&mut self) -> impl Iterator<Item = &mut Ship> {
        self.rows.iter_mut().flatten()
    }

    /// Live ships of one row; empty for a level outside the formation.
    pub fn ships_by_level(&self, level: u32) -> &[Ship] {
        level
            .checked_sub(1)
            .and_then(|index| self.rows.get(index as usize))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn firing_eligible_ships(&self) -> Vec<&Ship> {
        self.all_ships()
            .filter(|ship| ship.level() >= FIRING_LEVEL)
            .collect()
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.all_ships().find(|ship| ship.id() == id)
    }

    /// Remove a ship from whichever row holds it.  Returns the removed ship,
    /// or `None` when it was not in the fleet.
    pub fn remove_ship(&mut self, id: ShipId) -> Option<Ship> {
        self.rows.iter_mut().find_map(|row| {
            let index = row.iter().position(|ship| ship.id() == id)?;
            Some(row.remove(index))
        })
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }
}
