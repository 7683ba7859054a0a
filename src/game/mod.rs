//! Game controllers
//!
//! One controller owns everything a running game needs: simulation state,
//! its seeded RNG, display settings and run/stop state. Hosts drive it
//! through the `Game` trait without knowing which game is inside.

pub mod dodge;
pub mod garden;
pub mod roam;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use dodge::DodgeGame;
pub use garden::GardenGame;
pub use roam::RoamGame;

use crate::input::Key;
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::sim::Direction;
use crate::tuning::{GardenTuning, Tuning};

/// Decoded user input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Completed swipe or drag
    Swipe(Direction),
    /// Pointer pressed or moved, in canvas coordinates
    Pointer(Vec2),
    PointerUp,
}

/// Message for the blocking modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    GameOver { score: u64 },
    Win { score: u64 },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::GameOver { score } => format!("Game Over! Score: {score}"),
            Notice::Win { score } => format!("You win! Score: {score}"),
        }
    }
}

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Stopped,
}

/// Which game to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameKind {
    /// Turn-based grid, no obstacles
    Meadow,
    /// Turn-based grid with trees and rocks
    #[default]
    Thicket,
    /// Continuous lane dodge
    Dodge,
    /// Continuous free roam
    Roam,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [
        GameKind::Meadow,
        GameKind::Thicket,
        GameKind::Dodge,
        GameKind::Roam,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Meadow => "meadow",
            GameKind::Thicket => "thicket",
            GameKind::Dodge => "dodge",
            GameKind::Roam => "roam",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "meadow" => Some(GameKind::Meadow),
            "thicket" | "butterfly" => Some(GameKind::Thicket),
            "dodge" => Some(GameKind::Dodge),
            "roam" => Some(GameKind::Roam),
            _ => None,
        }
    }

    /// Pull `game=<kind>` out of a URL query string such as `?game=dodge&x=1`
    pub fn from_query(query: &str) -> Option<Self> {
        query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "game")
            .and_then(|(_, value)| Self::from_str(value))
    }

    /// Construct a controller for this kind
    ///
    /// Invalid tuning is logged and replaced by the defaults.
    pub fn build(self, tuning: &Tuning, settings: Settings, seed: u64) -> Box<dyn Game> {
        log::info!("Starting {} with seed {}", self.as_str(), seed);
        let fallback;
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning for {}: {e}; using defaults", self.as_str());
                fallback = Tuning::default();
                &fallback
            }
        };
        match self {
            GameKind::Meadow => {
                let garden = GardenTuning {
                    obstacles: 0,
                    ..tuning.garden.clone()
                };
                Box::new(GardenGame::new(self, garden, settings, seed))
            }
            GameKind::Thicket => {
                Box::new(GardenGame::new(self, tuning.garden.clone(), settings, seed))
            }
            GameKind::Dodge => Box::new(DodgeGame::new(tuning.dodge.clone(), settings, seed)),
            GameKind::Roam => Box::new(RoamGame::new(tuning.roam.clone(), settings, seed)),
        }
    }
}

/// A running game instance
pub trait Game {
    fn kind(&self) -> GameKind;

    /// Frame-driven (true) or input-driven (false)
    fn is_continuous(&self) -> bool;

    /// Apply one input; grid games may return a modal notice
    fn handle(&mut self, event: InputEvent) -> Option<Notice>;

    /// Advance one frame
    fn frame(&mut self) -> FrameControl;

    /// Redraw the whole scene
    fn draw(&self, surface: &mut dyn Surface);

    /// Canvas size in pixels
    fn canvas_size(&self) -> (f32, f32);

    fn score(&self) -> u64;

    fn is_over(&self) -> bool;

    /// Stop scheduling frames
    fn stop(&mut self);

    fn is_running(&self) -> bool;
}
