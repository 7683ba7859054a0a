//! Input decoding
//!
//! Turns raw key names, drag vectors and pointer positions into the
//! vocabulary the simulations consume. Event capture itself lives in the
//! platform entry point.

use glam::Vec2;

use crate::sim::Direction;

/// Logical keys the games react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Restart / confirm
    Action,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_code(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            " " | "Enter" => Some(Key::Action),
            _ => None,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Action => None,
        }
    }
}

/// Decode a drag vector into a direction
///
/// The longer axis wins (ties go vertical) and must exceed `min_distance`.
pub fn decode_swipe(dx: f32, dy: f32, min_distance: f32) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        if dx.abs() > min_distance {
            return Some(if dx > 0.0 { Direction::Right } else { Direction::Left });
        }
    } else if dy.abs() > min_distance {
        return Some(if dy > 0.0 { Direction::Down } else { Direction::Up });
    }
    None
}

/// Press/release tracker for touch and mouse swipes
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<Vec2>,
    min_distance: f32,
}

impl SwipeTracker {
    pub fn new(min_distance: f32) -> Self {
        Self {
            start: None,
            min_distance,
        }
    }

    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some(Vec2::new(x, y));
    }

    /// Finish the gesture; releases without a press decode to nothing
    pub fn end(&mut self, x: f32, y: f32) -> Option<Direction> {
        let start = self.start.take()?;
        decode_swipe(x - start.x, y - start.y, self.min_distance)
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }
}

/// Held directional keys for continuous games
///
/// Keys stay down until released or cleared; there is no timeout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyLatch {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyLatch {
    fn slot(&mut self, key: Key) -> Option<&mut bool> {
        match key {
            Key::Up => Some(&mut self.up),
            Key::Down => Some(&mut self.down),
            Key::Left => Some(&mut self.left),
            Key::Right => Some(&mut self.right),
            Key::Action => None,
        }
    }

    pub fn press(&mut self, key: Key) {
        if let Some(slot) = self.slot(key) {
            *slot = true;
        }
    }

    pub fn release(&mut self, key: Key) {
        if let Some(slot) = self.slot(key) {
            *slot = false;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Heading (radians, y down) for the held arrow keys
///
/// Opposite keys cancel; nothing held gives `None`.
pub fn heading_for_keys(latch: &KeyLatch) -> Option<f32> {
    let dx = latch.right as i32 - latch.left as i32;
    let dy = latch.down as i32 - latch.up as i32;
    if dx == 0 && dy == 0 {
        None
    } else {
        Some((dy as f32).atan2(dx as f32))
    }
}

/// Heading from `from` toward a pointer at `to`
pub fn heading_toward(from: Vec2, to: Vec2) -> Option<f32> {
    let delta = to - from;
    if delta.length_squared() < f32::EPSILON {
        None
    } else {
        Some(delta.y.atan2(delta.x))
    }
}
