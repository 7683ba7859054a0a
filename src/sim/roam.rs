//! Continuous free-roam collector
//!
//! The avatar flies along its heading on a wrap-around field. Each flower
//! collected makes it permanently faster and is replaced elsewhere at once;
//! hazards only accumulate. Touching any hazard ends the session.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{first_hit, within, wrap};
use super::spawn::{random_point, roll};
use crate::tuning::RoamTuning;

/// Steering for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoamInput {
    /// New heading in radians; `None` keeps the current one
    pub heading: Option<f32>,
}

/// Complete free-roam state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoamState {
    pub tuning: RoamTuning,
    pub pos: Vec2,
    /// Radians, 0 = +x, y grows downward
    pub heading: f32,
    /// Pixels per tick
    pub speed: f32,
    pub flowers: Vec<Vec2>,
    pub hazards: Vec<Vec2>,
    pub score: u64,
    pub game_over: bool,
}

impl RoamState {
    /// Avatar at the center, flowers and hazards scattered
    pub fn new<R: Rng + ?Sized>(tuning: RoamTuning, rng: &mut R) -> Self {
        let (w, h) = (tuning.width, tuning.height);
        let flowers = (0..tuning.flowers)
            .map(|_| random_point(rng, w, h))
            .collect();
        let hazards = (0..tuning.start_hazards)
            .map(|_| random_point(rng, w, h))
            .collect();
        Self::with_layout(tuning, flowers, hazards)
    }

    pub fn with_layout(tuning: RoamTuning, flowers: Vec<Vec2>, hazards: Vec<Vec2>) -> Self {
        Self {
            pos: Vec2::new(tuning.width / 2.0, tuning.height / 2.0),
            heading: 0.0,
            speed: tuning.start_speed,
            flowers,
            hazards,
            score: 0,
            game_over: false,
            tuning,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::from_angle(self.heading) * self.speed
    }

    /// Collect touching flowers, replacing each one
    fn collect_flowers<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u32 {
        let here = self.pos;
        let radius = self.tuning.hit_radius;
        let before = self.flowers.len();
        self.flowers.retain(|f| !within(here, *f, radius));
        let collected = before - self.flowers.len();

        let (w, h) = (self.tuning.width, self.tuning.height);
        for _ in 0..collected {
            self.flowers.push(random_point(rng, w, h));
        }

        let collected = collected as u32;
        self.score += u64::from(collected);
        self.speed += self.tuning.speed_bonus * collected as f32;
        collected
    }

    fn check_hazards(&mut self) {
        let radius = self.tuning.hit_radius;
        if let Some(index) = first_hit(self.pos, self.hazards.iter().map(|h| (*h, radius))) {
            self.game_over = true;
            log::info!(
                "Free roam over: hazard {} at {:?}, score {}",
                index,
                self.hazards[index],
                self.score
            );
        }
    }
}

/// Advance the field by one frame
pub fn tick<R: Rng + ?Sized>(state: &mut RoamState, input: &RoamInput, rng: &mut R) {
    if state.game_over {
        return;
    }

    if let Some(heading) = input.heading {
        state.heading = heading;
    }

    let (w, h) = (state.tuning.width, state.tuning.height);
    state.pos = wrap(state.pos + state.velocity(), w, h);

    let collected = state.collect_flowers(rng);
    if collected > 0 {
        log::debug!("Collected {collected}, speed now {:.2}", state.speed);
    }

    state.check_hazards();

    if roll(rng, state.tuning.spawn_chance) {
        let hazard = random_point(rng, w, h);
        log::debug!("Spawned hazard at {hazard:?}");
        state.hazards.push(hazard);
    }
}
