//! Pure game-logic functions.
//!
//! Nothing here owns state: every function takes plain values or shared
//! references and returns a result, so the `GameManager` stays a thin
//! sequencer over these rules.

use crate::entities::{Bullet, Ship};

// ── Enemy motion cycle ───────────────────────────────────────────────────────

/// Last counter value of the right/left/right cycle.
pub const MOTION_CYCLE_END: u32 = 50;
/// Value the counter falls back to after the cycle, skipping the first phase.
pub const MOTION_RESET: u32 = 10;
const FIRST_PHASE_END: u32 = 10;
const SECOND_PHASE_END: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Counter value for the next tick.  Once the cycle has run to its end the
/// counter wraps to `MOTION_RESET` before incrementing, so the tick after
/// counter 50 lands on 11 and the fleet heads left.
pub fn advance_motion_counter(counter: u32) -> u32 {
    let counter = if counter >= MOTION_CYCLE_END {
        MOTION_RESET
    } else {
        counter
    };
    counter + 1
}

/// Direction the fleet moves for a given counter value:
/// `[0, 10]` right, `(10, 30]` left, `(30, 50]` right.
pub fn motion_direction(counter: u32) -> Direction {
    if counter <= FIRST_PHASE_END {
        Direction::Right
    } else if counter <= SECOND_PHASE_END {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// Enemies only move while their x is inside `[0, width)`.
pub fn enemy_may_move(ship: &Ship, background_width: f64) -> bool {
    ship.x >= 0.0 && ship.x < background_width
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Point-in-rect test of the bullet's origin against the ship's box.
/// Both bounds are inclusive.
pub fn bullet_hit_ship(bullet: &Bullet, ship: &Ship) -> bool {
    let in_x = ship.x <= bullet.x && bullet.x <= ship.x + ship.width();
    let in_y = ship.y <= bullet.y && bullet.y <= ship.y + ship.height();
    in_x && in_y
}

// ── Firing rules ─────────────────────────────────────────────────────────────

/// Ammo-spacing check: true when no bullet is in flight, or when the closest
/// one (bottom edge to the shooter's top edge) is farther away than the
/// shooter is tall.
pub fn has_firing_clearance(shooter: &Ship, ammo: &[Bullet]) -> bool {
    ammo.iter()
        .map(|bullet| (bullet.bottom() - shooter.y).abs())
        .fold(None, |closest: Option<f64>, distance| {
            Some(closest.map_or(distance, |c| c.min(distance)))
        })
        .map_or(true, |closest| closest > shooter.height())
}

/// Where a new bullet appears for `shooter`: its horizontal centre, top edge.
pub fn muzzle_position(shooter: &Ship) -> (f64, f64) {
    (shooter.center_x(), shooter.y)
}

// ── Player movement ──────────────────────────────────────────────────────────

pub fn clamp_player_x(x: f64, ship_width: f64, background_width: f64) -> f64 {
    x.min(background_width - ship_width).max(0.0)
}

// ── Formation layout ─────────────────────────────────────────────────────────

/// Gap below the player ship and between formation columns/rows.
pub const PLAYER_BOTTOM_OFFSET: f64 = 30.0;
pub const ENEMY_SPACING: f64 = 30.0;
const TOP_CANVAS_BUFFER: f64 = 20.0;

/// Start position of the player ship: centred, just above the bottom edge.
pub fn player_start(ship: &Ship, background_width: f64, background_height: f64) -> (f64, f64) {
    (
        background_width / 2.0 - ship.width() / 2.0,
        background_height - ship.height() - PLAYER_BOTTOM_OFFSET,
    )
}

/// Origin of the first (lowest, level-1) formation row.
pub fn first_row_origin(
    ship_width: f64,
    ship_height: f64,
    row_count: usize,
    levels: u32,
    background_width: f64,
) -> (f64, f64) {
    let x = background_width / 2.0 - ship_width * (row_count as f64 / 2.0) - ENEMY_SPACING;
    let y = (TOP_CANVAS_BUFFER + ship_height) * f64::from(levels);
    (x, y)
}

/// Origin of a row given the first ship of the row below it: one column
/// further left and one row higher.
pub fn next_row_origin(previous_first: &Ship, ship_height: f64) -> (f64, f64) {
    (
        previous_first.x - (previous_first.width() + ENEMY_SPACING),
        previous_first.y - (ENEMY_SPACING + ship_height),
    )
}

/// Horizontal step between neighbours in a row.
pub fn column_step(ship_width: f64) -> f64 {
    ship_width + ENEMY_SPACING
}

/// How far the fleet drifts to either side of its starting column over one
/// motion cycle.
pub fn motion_sway(speed_x: f64) -> f64 {
    speed_x * f64::from(FIRST_PHASE_END)
}

/// Offset that moves the formation span `[left, right]` inside
/// `[min_x, max_x]`.  The left edge wins when the span is too wide.
pub fn formation_shift(left: f64, right: f64, min_x: f64, max_x: f64) -> f64 {
    if left < min_x {
        min_x - left
    } else if right > max_x {
        (max_x - right).max(min_x - left)
    } else {
        0.0
    }
}

/// Origin and column step for a row of `count` ships so that every ship's x
/// lies in `[min_x, max_x]`.  The step only shrinks when the row cannot fit
/// at its normal spacing.
pub fn fit_row(
    x_origin: f64,
    count: usize,
    ship_width: f64,
    min_x: f64,
    max_x: f64,
) -> (f64, f64) {
    let room = (max_x - min_x).max(0.0);
    let mut step = column_step(ship_width);
    if count > 1 {
        step = step.min(room / (count - 1) as f64);
    }
    let span = step * count.saturating_sub(1) as f64;
    (x_origin.clamp(min_x, min_x + (room - span).max(0.0)), step)
}
