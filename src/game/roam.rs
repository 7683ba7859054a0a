//! Free roam controller
//!
//! No restart: a finished session stays on its game-over overlay until the
//! page reloads.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{FrameControl, Game, GameKind, InputEvent, Notice, RunState};
use crate::input::{KeyLatch, heading_for_keys, heading_toward};
use crate::renderer::{Surface, draw_roam};
use crate::settings::Settings;
use crate::sim::roam::{RoamInput, RoamState, tick};
use crate::tuning::RoamTuning;

pub struct RoamGame {
    state: RoamState,
    rng: Pcg32,
    keys: KeyLatch,
    /// Heading requested since the last frame
    pending_heading: Option<f32>,
    settings: Settings,
    run: RunState,
}

impl RoamGame {
    pub fn new(tuning: RoamTuning, settings: Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = RoamState::new(tuning, &mut rng);
        Self {
            state,
            rng,
            keys: KeyLatch::default(),
            pending_heading: None,
            settings,
            run: RunState::Running,
        }
    }

    pub fn state(&self) -> &RoamState {
        &self.state
    }

    fn steer_with_keys(&mut self) {
        if let Some(heading) = heading_for_keys(&self.keys) {
            self.pending_heading = Some(heading);
        }
    }
}

impl Game for RoamGame {
    fn kind(&self) -> GameKind {
        GameKind::Roam
    }

    fn is_continuous(&self) -> bool {
        true
    }

    fn handle(&mut self, event: InputEvent) -> Option<Notice> {
        match event {
            InputEvent::KeyDown(key) => {
                self.keys.press(key);
                self.steer_with_keys();
            }
            InputEvent::KeyUp(key) => {
                self.keys.release(key);
                self.steer_with_keys();
            }
            InputEvent::Pointer(target) => {
                if let Some(heading) = heading_toward(self.state.pos, target) {
                    self.pending_heading = Some(heading);
                }
            }
            InputEvent::Swipe(direction) => {
                let (dx, dy) = direction.delta();
                self.pending_heading = Some((dy as f32).atan2(dx as f32));
            }
            InputEvent::PointerUp => {}
        }
        None
    }

    fn frame(&mut self) -> FrameControl {
        if self.run == RunState::Stopped {
            return FrameControl::Stop;
        }
        let input = RoamInput {
            heading: self.pending_heading.take(),
        };
        tick(&mut self.state, &input, &mut self.rng);
        FrameControl::Continue
    }

    fn draw(&self, surface: &mut dyn Surface) {
        draw_roam(&self.state, &self.settings, surface);
    }

    fn canvas_size(&self) -> (f32, f32) {
        (self.state.tuning.width, self.state.tuning.height)
    }

    fn score(&self) -> u64 {
        self.state.score
    }

    fn is_over(&self) -> bool {
        self.state.game_over
    }

    fn stop(&mut self) {
        self.run = RunState::Stopped;
    }

    fn is_running(&self) -> bool {
        self.run == RunState::Running
    }
}
