//! Single-threaded command queue driving a `GameManager`.
//!
//! Wall-clock time is fed in through `advance`, which enqueues one `Tick` per
//! elapsed period.  Input commands are queued with `submit` and run in
//! arrival order alongside the ticks.  Nothing here sleeps or spawns threads;
//! the caller's loop owns the clock.

use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info};
use rand::Rng;

use crate::game::GameManager;

/// Most ticks one `advance` call will queue.
pub const MAX_CATCH_UP_TICKS: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Tick,
    MoveLeft,
    MoveRight,
    Fire,
}

#[derive(Debug)]
pub struct Scheduler {
    period: Duration,
    accumulated: Duration,
    pending: VecDeque<Command>,
    running: bool,
}

impl Scheduler {
    /// A zero period is bumped to one millisecond.
    pub fn new(period: Duration) -> Self {
        Scheduler {
            period: period.max(Duration::from_millis(1)),
            accumulated: Duration::ZERO,
            pending: VecDeque::new(),
            running: true,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Queue an input command.  Ignored once the scheduler has stopped.
    pub fn submit(&mut self, command: Command) {
        if self.running {
            self.pending.push_back(command);
        }
    }

    /// Account for `elapsed` wall time, queueing a `Tick` for every whole
    /// period that has passed, up to `MAX_CATCH_UP_TICKS`.  Time beyond the
    /// cap is dropped.  Returns the number of ticks queued.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulated += elapsed;
        let mut queued = 0;
        while self.accumulated >= self.period {
            if queued == MAX_CATCH_UP_TICKS {
                debug!(
                    "dropping {:?} of simulation time after a stall",
                    self.accumulated
                );
                self.accumulated = Duration::ZERO;
                break;
            }
            self.accumulated -= self.period;
            self.pending.push_back(Command::Tick);
            queued += 1;
        }
        queued
    }

    /// Run every queued command against `game`, oldest first.  When the game
    /// ends the scheduler stops and whatever is left in the queue is dropped.
    /// Returns the number of commands run.
    pub fn run_pending(&mut self, game: &mut GameManager, rng: &mut impl Rng) -> usize {
        let mut ran = 0;
        while self.running {
            let Some(command) = self.pending.pop_front() else {
                break;
            };
            match command {
                Command::Tick => game.tick(rng),
                Command::MoveLeft => game.move_player_left(),
                Command::MoveRight => game.move_player_right(),
                Command::Fire => {
                    if !game.is_game_over() {
                        game.fire_player_bullet();
                    }
                }
            }
            ran += 1;
            if game.is_game_over() {
                info!("game ended after {} ticks, stopping scheduler", game.tick_count());
                self.stop();
            }
        }
        ran
    }

    /// Halt dispatch and drop anything still queued.
    pub fn stop(&mut self) {
        self.running = false;
        self.pending.clear();
        self.accumulated = Duration::ZERO;
    }

    /// Resume after `stop`, e.g. for a new game.
    pub fn restart(&mut self) {
        self.stop();
        self.running = true;
    }
}
