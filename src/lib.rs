//! Emoji Meadow - emoji sprite mini-games for the browser canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, pursuit, collisions, spawning)
//! - `tuning`: Data-driven game balance
//! - `settings`: Display preferences
//! - `input`: Key, swipe and heading decoding
//! - `renderer`: Draw-call generation over a `Surface`
//! - `game`: Per-instance controllers tying the above together

pub mod game;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{FrameControl, Game, GameKind, InputEvent, Notice};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Grid games: cells per side
    pub const GRID_SIZE: i32 = 16;
    /// Grid games: canvas side in pixels
    pub const GRID_CANVAS_PX: f32 = 480.0;
    pub const NUM_FLOWERS: usize = 8;
    pub const NUM_BIRDS: usize = 2;
    /// Trees and rocks
    pub const NUM_OBSTACLES: usize = 10;
    /// Birds move every N accepted moves
    pub const BIRD_MOVE_INTERVAL: u32 = 2;

    /// Lane dodge canvas
    pub const DODGE_WIDTH: f32 = 400.0;
    pub const DODGE_HEIGHT: f32 = 600.0;
    pub const DODGE_PLAYER_WIDTH: f32 = 40.0;
    pub const DODGE_PLAYER_SPEED: f32 = 5.0;
    /// Distance of the player's center from the bottom edge
    pub const DODGE_PLAYER_LIFT: f32 = 60.0;
    pub const DODGE_START_SPEED: f32 = 2.0;
    /// Per-tick growth of the shared fall speed
    pub const DODGE_SPEED_RAMP: f32 = 0.001;
    pub const DODGE_FOLLOW_FRACTION: f32 = 0.02;
    pub const DODGE_SPAWN_CHANCE: f32 = 0.02;
    /// Hazards this far below the bottom edge are dropped
    pub const DODGE_DESPAWN_MARGIN: f32 = 50.0;

    /// Free roam canvas
    pub const ROAM_WIDTH: f32 = 800.0;
    pub const ROAM_HEIGHT: f32 = 600.0;
    pub const ROAM_START_SPEED: f32 = 2.0;
    pub const ROAM_SPEED_BONUS: f32 = 0.05;
    pub const ROAM_HIT_RADIUS: f32 = 20.0;
    pub const ROAM_FLOWERS: usize = 5;
    pub const ROAM_START_HAZARDS: usize = 3;
    pub const ROAM_SPAWN_CHANCE: f32 = 0.005;
}

/// Wrap a coordinate into [0, size)
#[inline]
pub fn wrap_coord(value: f32, size: f32) -> f32 {
    let wrapped = value.rem_euclid(size);
    // rem_euclid can round up to exactly `size` for tiny negative inputs
    if wrapped >= size { 0.0 } else { wrapped }
}
