//! The game manager: owns every piece of simulation state and advances it one
//! tick at a time.
//!
//! The manager holds no timer.  A driver (see `scheduler`) calls `tick` at a
//! fixed period and forwards input commands between ticks.  Randomness is
//! injected into `tick` so callers control determinism.

use log::{debug, info, warn};
use rand::Rng;

use crate::compute::{
    advance_motion_counter, bullet_hit_ship, clamp_player_x, column_step, enemy_may_move,
    first_row_origin, fit_row, formation_shift, has_firing_clearance, motion_direction,
    motion_sway, muzzle_position, next_row_origin, player_start, Direction,
};
use crate::config::GameConfig;
use crate::entities::{Bullet, BulletOwner, GameStatus, Ship, ShipId, ShipKind};
use crate::error::GameError;
use crate::fleet::Fleet;
use crate::lives::LivesPool;
use crate::scoreboard::Scoreboard;

#[derive(Clone, Debug)]
pub struct GameManager {
    background_height: f64,
    background_width: f64,
    config: GameConfig,
    fleet: Fleet,
    lives: LivesPool,
    scoreboard: Scoreboard,
    player_ammo: Vec<Bullet>,
    enemy_ammo: Vec<Bullet>,
    player_ship: Ship,
    bonus_ship: Option<Ship>,
    enemy_motion_counter: u32,
    wave: u32,
    status: GameStatus,
    tick_count: u64,
}

impl GameManager {
    /// Build a manager for a `background_height × background_width` playfield.
    /// Both must be positive and finite.
    pub fn new(
        background_height: f64,
        background_width: f64,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(background_height) || !valid(background_width) {
            return Err(GameError::InvalidDimensions {
                height: background_height,
                width: background_width,
            });
        }

        let lives = LivesPool::new(config.starting_lives);
        let player_ship = lives
            .current()
            .cloned()
            .unwrap_or_else(|| Ship::new(ShipKind::Player));

        Ok(GameManager {
            background_height,
            background_width,
            fleet: Fleet::new(config.fleet_levels),
            lives,
            scoreboard: Scoreboard::new(),
            player_ammo: Vec::new(),
            enemy_ammo: Vec::new(),
            player_ship,
            bonus_ship: None,
            enemy_motion_counter: 0,
            wave: 1,
            status: GameStatus::Playing,
            tick_count: 0,
            config,
        })
    }

    /// Build a manager sized from the config's background dimensions.
    pub fn from_config(config: GameConfig) -> Result<Self, GameError> {
        Self::new(config.background_height, config.background_width, config)
    }

    /// Put the player ship and the enemy formation into play.
    pub fn initialize_game(&mut self) {
        self.add_player_ship_to_game();
        self.add_enemy_ships_to_game();
        info!(
            "wave {} started: {} enemy ships in {} rows",
            self.wave,
            self.fleet.len(),
            self.fleet.amount_of_levels()
        );
    }

    // ── Per-tick update ──────────────────────────────────────────────────────

    /// Advance the simulation by one tick.  Does nothing once the game is over.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if self.status.is_over() {
            return;
        }
        self.tick_count += 1;

        self.handle_bonus_ship(rng);
        self.move_enemy_ships();
        self.fire_enemy_bullets(rng);
        self.move_bullets();
        self.handle_player_bullet_hits();
        self.handle_enemy_bullet_hits();
        self.is_game_over();
    }

    fn handle_bonus_ship(&mut self, rng: &mut impl Rng) {
        match self.bonus_ship.as_mut() {
            None => {
                let chance = self.config.bonus_spawn_chance;
                let chance = if chance.is_finite() { chance.clamp(0.0, 1.0) } else { 0.0 };
                if rng.gen_bool(chance) {
                    let mut bonus = Ship::new(ShipKind::Bonus);
                    bonus.x = self.background_width - bonus.width();
                    bonus.y = 0.0;
                    bonus.active = true;
                    debug!("bonus ship spawned at x={}", bonus.x);
                    self.bonus_ship = Some(bonus);
                }
            }
            Some(bonus) => {
                bonus.move_left();
                if bonus.x <= 0.0 {
                    debug!("bonus ship left the playfield");
                    self.bonus_ship = None;
                }
            }
        }
    }

    /// Step the fleet along its right/left/right cycle.
    pub fn move_enemy_ships(&mut self) {
        self.enemy_motion_counter = advance_motion_counter(self.enemy_motion_counter);
        let direction = motion_direction(self.enemy_motion_counter);
        let width = self.background_width;
        for enemy in self.fleet.all_ships_mut() {
            if enemy_may_move(enemy, width) {
                match direction {
                    Direction::Right => enemy.move_right(),
                    Direction::Left => enemy.move_left(),
                }
            }
        }
    }

    fn fire_enemy_bullets(&mut self, rng: &mut impl Rng) {
        let shooters: Vec<Ship> = self
            .fleet
            .firing_eligible_ships()
            .into_iter()
            .cloned()
            .collect();
        if shooters.is_empty() {
            return;
        }

        let attempts = rng.gen_range(0..shooters.len());
        for _ in 0..attempts {
            let shooter = &shooters[rng.gen_range(0..shooters.len())];
            if self.enemy_ammo.len() < self.config.ammo_cap
                && has_firing_clearance(shooter, &self.enemy_ammo)
            {
                let (x, y) = muzzle_position(shooter);
                self.enemy_ammo.push(Bullet::new(BulletOwner::Enemy, x, y));
                debug!("enemy {:?} fired from ({x}, {y})", shooter.id());
            }
        }
    }

    fn move_bullets(&mut self) {
        let height = self.background_height;

        for bullet in &mut self.enemy_ammo {
            bullet.advance();
        }
        self.enemy_ammo.retain(|bullet| bullet.y < height);

        for bullet in &mut self.player_ammo {
            bullet.advance();
        }
        self.player_ammo.retain(|bullet| bullet.y > 0.0);
    }

    /// Match player bullets against the fleet and the bonus ship.  Hits are
    /// collected from a snapshot first and removed afterwards.
    fn handle_player_bullet_hits(&mut self) {
        if self.player_ammo.is_empty() {
            return;
        }

        let mut spent = vec![false; self.player_ammo.len()];
        let mut killed: Vec<(ShipId, u32)> = Vec::new();
        let mut bonus_hit = false;

        for enemy in self.fleet.all_ships() {
            let hit = self
                .player_ammo
                .iter()
                .enumerate()
                .find(|(i, bullet)| !spent[*i] && bullet_hit_ship(bullet, enemy));
            if let Some((i, _)) = hit {
                spent[i] = true;
                killed.push((enemy.id(), enemy.level()));
            }
        }

        if let Some(bonus) = &self.bonus_ship {
            let hit = self
                .player_ammo
                .iter()
                .enumerate()
                .find(|(i, bullet)| !spent[*i] && bullet_hit_ship(bullet, bonus));
            if let Some((i, _)) = hit {
                spent[i] = true;
                bonus_hit = true;
            }
        }

        for (id, level) in killed {
            self.scoreboard.increase_score(level);
            self.fleet.remove_ship(id);
            debug!("enemy {id:?} (level {level}) destroyed");
        }
        if bonus_hit {
            self.scoreboard.award_bonus();
            self.bonus_ship = None;
            info!("bonus ship destroyed");
        }

        let mut spent = spent.into_iter();
        self.player_ammo.retain(|_| !spent.next().unwrap_or(false));
    }

    fn handle_enemy_bullet_hits(&mut self) {
        if !self.player_ship.active {
            return;
        }
        // Every bullet on the ship is spent, not just the first.
        let player = &self.player_ship;
        let before = self.enemy_ammo.len();
        self.enemy_ammo.retain(|bullet| !bullet_hit_ship(bullet, player));
        if self.enemy_ammo.len() < before {
            self.destroy_player_ship();
        }
    }

    fn destroy_player_ship(&mut self) {
        self.player_ship.destroyed = true;
        self.player_ship.active = false;
        info!("player ship destroyed, {} lives left", self.lives.lives_count());

        if !self.lives.has_lives_remaining() {
            return;
        }
        match self.lives.use_life() {
            Ok(ship) => {
                self.player_ship = ship;
                self.add_player_ship_to_game();
                info!("player ship respawned");
            }
            Err(e) => {
                warn!("respawn failed: {e}");
                self.status = GameStatus::GameOver;
            }
        }
    }

    // ── Game-over & waves ────────────────────────────────────────────────────

    /// True once the game has ended.  Clearing the fleet before the wave cap
    /// starts the next wave instead and returns false.
    pub fn is_game_over(&mut self) -> bool {
        if self.status.is_over() {
            return true;
        }

        if !self.lives.has_lives_remaining() || !self.player_ship.active {
            self.status = GameStatus::GameOver;
            info!("game over: score {} on wave {}", self.game_score(), self.wave);
            return true;
        }

        if self.fleet.is_empty() {
            if self.wave < self.config.wave_cap {
                self.advance_wave();
                return false;
            }
            self.status = GameStatus::Victory;
            info!("all {} waves cleared: score {}", self.wave, self.game_score());
            return true;
        }

        false
    }

    fn advance_wave(&mut self) {
        let levels = self.fleet.amount_of_levels() + 1;
        self.wave += 1;
        self.player_ammo.clear();
        self.enemy_ammo.clear();
        self.bonus_ship = None;
        self.enemy_motion_counter = 0;
        self.fleet = Fleet::new(levels);
        self.lives = LivesPool::new(self.config.starting_lives);
        if let Some(ship) = self.lives.current() {
            self.player_ship = ship.clone();
        }
        self.initialize_game();
    }

    // ── Input commands ───────────────────────────────────────────────────────

    /// Fire from the player ship if the ammo cap and spacing allow, then run
    /// the hit pass at once so a point-blank shot registers this tick.
    pub fn fire_player_bullet(&mut self) {
        if self.status.is_over() || !self.player_ship.active {
            return;
        }
        if self.player_ammo.len() < self.config.ammo_cap
            && has_firing_clearance(&self.player_ship, &self.player_ammo)
        {
            let (x, y) = muzzle_position(&self.player_ship);
            self.player_ammo.push(Bullet::new(BulletOwner::Player, x, y));
        }
        self.handle_player_bullet_hits();
    }

    pub fn move_player_left(&mut self) {
        self.move_player(Direction::Left);
    }

    pub fn move_player_right(&mut self) {
        self.move_player(Direction::Right);
    }

    fn move_player(&mut self, direction: Direction) {
        if self.status.is_over() || !self.player_ship.active {
            return;
        }
        match direction {
            Direction::Left => self.player_ship.move_left(),
            Direction::Right => self.player_ship.move_right(),
        }
        self.player_ship.x = clamp_player_x(
            self.player_ship.x,
            self.player_ship.width(),
            self.background_width,
        );
    }

    // ── Placement ────────────────────────────────────────────────────────────

    fn add_player_ship_to_game(&mut self) {
        let (x, y) = player_start(&self.player_ship, self.background_width, self.background_height);
        self.player_ship.x = x;
        self.player_ship.y = y;
        self.player_ship.destroyed = false;
        self.player_ship.active = true;
    }

    fn add_enemy_ships_to_game(&mut self) {
        let levels = self.fleet.amount_of_levels();
        let mut previous_first: Option<Ship> = None;
        let mut rows: Vec<(u32, f64, f64)> = Vec::new();

        for level in 1..=levels {
            let Some(first) = self.fleet.ships_by_level(level).first() else {
                continue;
            };
            let (x, y) = match &previous_first {
                None => first_row_origin(
                    first.width(),
                    first.height(),
                    Fleet::ship_count_for_level(level),
                    levels,
                    self.background_width,
                ),
                Some(previous) => next_row_origin(previous, first.height()),
            };
            rows.push((level, x, y));

            let mut placed = first.clone();
            placed.x = x;
            placed.y = y;
            previous_first = Some(placed);
        }

        // Each row starts one column further left than the one below, so
        // deep fleets slide off the field unless pulled back on.  The bounds
        // leave room for the sideways sway of the motion cycle.
        let Some(sample) = self.fleet.all_ships().next() else {
            return;
        };
        let sway = motion_sway(sample.speed_x());
        let min_x = sway;
        let max_x = self.background_width - sample.width() - sway;

        let spans = rows.iter().filter_map(|&(level, x, _)| {
            let row = self.fleet.ships_by_level(level);
            let last = column_step(row.first()?.width()) * row.len().saturating_sub(1) as f64;
            Some((x, x + last))
        });
        let (left, right) = spans.fold((f64::INFINITY, f64::NEG_INFINITY), |(l, r), (a, b)| {
            (l.min(a), r.max(b))
        });
        let shift = formation_shift(left, right, min_x, max_x);

        for (level, x_origin, y) in rows {
            let row = self.fleet.ships_by_level(level);
            let Some(width) = row.first().map(Ship::width) else {
                continue;
            };
            let (origin, step) = fit_row(x_origin + shift, row.len(), width, min_x, max_x);
            let row = self.fleet.all_ships_mut().filter(|s| s.level() == level);
            for (column, enemy) in row.enumerate() {
                enemy.x = (origin + step * column as f64).min(max_x.max(min_x));
                enemy.y = y;
                enemy.active = true;
            }
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn game_score(&self) -> u32 {
        self.scoreboard.score()
    }

    pub fn game_statistics(&self) -> String {
        format!(
            "Score: {}\nLives: {}",
            self.scoreboard.score(),
            self.lives.lives_count()
        )
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn lives_count(&self) -> u32 {
        self.lives.lives_count()
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn player_ship(&self) -> &Ship {
        &self.player_ship
    }

    pub fn player_ammo(&self) -> &[Bullet] {
        &self.player_ammo
    }

    pub fn enemy_ammo(&self) -> &[Bullet] {
        &self.enemy_ammo
    }

    pub fn bonus_ship(&self) -> Option<&Ship> {
        self.bonus_ship.as_ref()
    }

    pub fn enemy_motion_counter(&self) -> u32 {
        self.enemy_motion_counter
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn background_width(&self) -> f64 {
        self.background_width
    }

    pub fn background_height(&self) -> f64 {
        self.background_height
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // Direct state access for drivers and scenario tests.

    pub fn fleet_mut(&mut self) -> &mut Fleet {
        &mut self.fleet
    }

    pub fn player_ship_mut(&mut self) -> &mut Ship {
        &mut self.player_ship
    }

    pub fn player_ammo_mut(&mut self) -> &mut Vec<Bullet> {
        &mut self.player_ammo
    }

    pub fn enemy_ammo_mut(&mut self) -> &mut Vec<Bullet> {
        &mut self.enemy_ammo
    }
}
