//! Game entity types: ships, bullets and the status flag.  Pure data plus
//! the small movement helpers every entity shares.

use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Every wave up to the cap has been cleared.
    Victory,
    GameOver,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Playing
    }
}

// ── Ship identity ─────────────────────────────────────────────────────────────

static NEXT_SHIP_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a minted ship.  Removal from the fleet is by id, never by
/// structural equality, so two ships at the same spot stay distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipId(u32);

impl ShipId {
    fn next() -> Self {
        ShipId(NEXT_SHIP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// ── Ship kinds & stat table ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipKind {
    Player,
    /// Fleet ship; `level` is its row index, starting at 1.
    Enemy { level: u32 },
    /// Stochastic fly-by ship, worth a flat bonus.
    Bonus,
}

/// Sprite/behaviour tier.  Every enemy level above 3 shares the level-3 look
/// and stats; only its score value keeps growing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Player,
    Level1,
    Level2,
    Level3,
    Default,
    Bonus,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ShipStats {
    width: f64,
    height: f64,
    speed_x: f64,
    speed_y: f64,
}

const PLAYER_STATS: ShipStats = ShipStats { width: 30.0, height: 20.0, speed_x: 3.0, speed_y: 0.0 };
const ENEMY_STATS: ShipStats = ShipStats { width: 30.0, height: 20.0, speed_x: 3.0, speed_y: 0.0 };
const BONUS_STATS: ShipStats = ShipStats { width: 40.0, height: 20.0, speed_x: 5.0, speed_y: 0.0 };

impl ShipKind {
    /// Enemy kind for a row; levels below 1 are clamped up.
    pub fn enemy(level: u32) -> Self {
        ShipKind::Enemy { level: level.max(1) }
    }

    /// Level used for scoring.  Player and bonus ships are level 0.
    pub fn level(self) -> u32 {
        match self {
            ShipKind::Enemy { level } => level,
            ShipKind::Player | ShipKind::Bonus => 0,
        }
    }

    pub fn tier(self) -> Tier {
        match self {
            ShipKind::Player => Tier::Player,
            ShipKind::Bonus => Tier::Bonus,
            ShipKind::Enemy { level: 1 } => Tier::Level1,
            ShipKind::Enemy { level: 2 } => Tier::Level2,
            ShipKind::Enemy { level: 3 } => Tier::Level3,
            ShipKind::Enemy { .. } => Tier::Default,
        }
    }

    fn stats(self) -> ShipStats {
        match self.tier() {
            Tier::Player => PLAYER_STATS,
            Tier::Bonus => BONUS_STATS,
            Tier::Level1 | Tier::Level2 | Tier::Level3 | Tier::Default => ENEMY_STATS,
        }
    }
}

// ── Ships ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    id: ShipId,
    kind: ShipKind,
    pub x: f64,
    pub y: f64,
    width: f64,
    height: f64,
    speed_x: f64,
    speed_y: f64,
    /// Whether the ship is currently in play.
    pub active: bool,
    /// Set on the player ship when an enemy bullet lands.
    pub destroyed: bool,
}

impl Ship {
    /// Mint a new ship at the origin with a fresh id.
    pub fn new(kind: ShipKind) -> Self {
        let stats = kind.stats();
        Ship {
            id: ShipId::next(),
            kind,
            x: 0.0,
            y: 0.0,
            width: stats.width,
            height: stats.height,
            speed_x: stats.speed_x,
            speed_y: stats.speed_y,
            active: false,
            destroyed: false,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn level(&self) -> u32 {
        self.kind.level()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn speed_x(&self) -> f64 {
        self.speed_x
    }

    pub fn speed_y(&self) -> f64 {
        self.speed_y
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn move_left(&mut self) {
        self.x -= self.speed_x;
    }

    pub fn move_right(&mut self) {
        self.x += self.speed_x;
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    /// Travels upward.
    Player,
    /// Travels downward.
    Enemy,
}

pub const BULLET_WIDTH: f64 = 4.0;
pub const BULLET_HEIGHT: f64 = 10.0;
pub const BULLET_SPEED_X: f64 = 0.0;
pub const BULLET_SPEED_Y: f64 = 9.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(owner: BulletOwner, x: f64, y: f64) -> Self {
        Bullet { x, y, owner }
    }

    pub fn width(&self) -> f64 {
        BULLET_WIDTH
    }

    pub fn height(&self) -> f64 {
        BULLET_HEIGHT
    }

    pub fn bottom(&self) -> f64 {
        self.y + BULLET_HEIGHT
    }

    /// Advance one tick in the owner's direction.
    pub fn advance(&mut self) {
        self.x += BULLET_SPEED_X;
        match self.owner {
            BulletOwner::Player => self.y -= BULLET_SPEED_Y,
            BulletOwner::Enemy => self.y += BULLET_SPEED_Y,
        }
    }
}
