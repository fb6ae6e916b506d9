/// All game entity types — pure data, no logic — plus the world constants
/// that size them and the shared bounding-rectangle capability the collision
/// code queries uniformly across entity kinds.

use crate::geom::{Rect, Vec2};

// ── World & tuning constants ─────────────────────────────────────────────────

/// The fixed simulation space; the renderer scales it to the terminal.
pub const SCREEN_WIDTH: f32 = 1036.0;
pub const SCREEN_HEIGHT: f32 = 569.0;

/// Vertical displacement of the centipede head when it turns around.
pub const Y_DISPLACEMENT: f32 = 25.0;

pub const SHIP_SPEED: f32 = 300.0;
pub const LASER_SPEED: f32 = 600.0;
pub const CENTIPEDE_SPEED: f32 = 450.0;
pub const SPIDER_SPEED: f32 = 200.0;

/// Minimum seconds between laser shots.
pub const SHOT_INTERVAL: f32 = 0.6;

/// Seconds after death before the spider comes back.
pub const SPIDER_RESPAWN_DELAY: f32 = 5.0;

/// Gap a body segment tolerates from its predecessor before closing in.
pub const FOLLOW_DISTANCE: f32 = 30.0;

/// Mushroom-free bands at the top and bottom of the screen.  The ship lives
/// inside the bottom band.
pub const TOP_BUFFER: f32 = 50.0;
pub const BOTTOM_BUFFER: f32 = 100.0;

// Visual footprints.
pub const SEGMENT_SIZE: f32 = 27.0;
pub const MUSHROOM_SIZE: f32 = 27.0;
pub const SHIP_WIDTH: f32 = 33.0;
pub const SHIP_HEIGHT: f32 = 33.0;
pub const LASER_WIDTH: f32 = 4.0;
pub const LASER_HEIGHT: f32 = 16.0;
pub const SPIDER_WIDTH: f32 = 31.0;
pub const SPIDER_HEIGHT: f32 = 18.0;

pub const STARTING_SEGMENTS: usize = 12;
pub const MUSHROOM_COUNT: usize = 30;
pub const STARTING_LIVES: u32 = 2;

// Score awards.
pub const SCORE_HEAD: u32 = 100;
pub const SCORE_BODY: u32 = 10;
pub const SCORE_SPIDER: u32 = 300;
pub const SCORE_MUSHROOM: u32 = 4;

// ── Status ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    Won,
    GameOver,
}

// ── Entities ─────────────────────────────────────────────────────────────────

/// A static, twice-destructible terrain obstacle.
#[derive(Clone, Debug)]
pub struct Mushroom {
    pub pos: Vec2,
    pub damaged: bool,
}

/// The segmented enemy chain.  `segments[0]` is the head and dictates
/// steering; the rest follow.  A centipede in the game's collection is never
/// empty — the tick loop removes it the moment its last segment is gone.
#[derive(Clone, Debug)]
pub struct Centipede {
    pub segments: Vec<Vec2>,
    pub direction: Vec2,
    /// Vertical travel sense for the turn-around step: true = downward.
    pub descending: bool,
}

/// The bouncing random-walker.  One instance exists for the whole game;
/// it is toggled dead/alive rather than destroyed.
#[derive(Clone, Debug)]
pub struct Spider {
    pub pos: Vec2,
    pub direction: Vec2,
    pub alive: bool,
    /// Seconds accumulated since the spider was shot; drives respawn.
    pub time_since_death: f32,
}

/// A player shot travelling straight up.
#[derive(Clone, Debug)]
pub struct Laser {
    pub pos: Vec2,
}

#[derive(Clone, Debug)]
pub struct Ship {
    pub pos: Vec2,
    pub lives: u32,
}

// ── Per-tick input facts ─────────────────────────────────────────────────────

/// Boolean key-down states sampled once per tick by the shell.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub centipedes: Vec<Centipede>,
    pub mushrooms: Vec<Mushroom>,
    pub lasers: Vec<Laser>,
    pub spider: Spider,
    pub ship: Ship,
    pub score: u32,
    pub status: GameStatus,
    /// Seconds left until the ship may fire again.
    pub shot_cooldown: f32,
}

// ── Footprint capability ─────────────────────────────────────────────────────

/// Uniform bounding-rectangle query used for every collision test.
pub trait Footprint {
    fn bounds(&self) -> Rect;
}

impl Footprint for Mushroom {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, MUSHROOM_SIZE, MUSHROOM_SIZE)
    }
}

impl Footprint for Spider {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, SPIDER_WIDTH, SPIDER_HEIGHT)
    }
}

impl Footprint for Laser {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, LASER_WIDTH, LASER_HEIGHT)
    }
}

impl Footprint for Ship {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, SHIP_WIDTH, SHIP_HEIGHT)
    }
}

/// A centipede segment is a bare position; its footprint comes from here.
pub fn segment_bounds(pos: Vec2) -> Rect {
    Rect::new(pos.x, pos.y, SEGMENT_SIZE, SEGMENT_SIZE)
}
