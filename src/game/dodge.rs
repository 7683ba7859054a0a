//! Lane dodge controller

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{FrameControl, Game, GameKind, InputEvent, Notice, RunState};
use crate::input::{Key, KeyLatch};
use crate::renderer::{Surface, draw_dodge};
use crate::settings::Settings;
use crate::sim::dodge::{DodgeInput, DodgeState, tick};
use crate::tuning::DodgeTuning;

/// Pointer within this many pixels of the player counts as "here"
const POINTER_DEADZONE: f32 = 5.0;

pub struct DodgeGame {
    state: DodgeState,
    rng: Pcg32,
    keys: KeyLatch,
    /// Held pointer x; steering is re-aimed at it every frame
    pointer_target: Option<f32>,
    settings: Settings,
    run: RunState,
}

impl DodgeGame {
    pub fn new(tuning: DodgeTuning, settings: Settings, seed: u64) -> Self {
        Self {
            state: DodgeState::new(tuning),
            rng: Pcg32::seed_from_u64(seed),
            keys: KeyLatch::default(),
            pointer_target: None,
            settings,
            run: RunState::Running,
        }
    }

    pub fn state(&self) -> &DodgeState {
        &self.state
    }

    pub fn keys(&self) -> &KeyLatch {
        &self.keys
    }

    /// Restart after a game over; ignored mid-run
    pub fn request_restart(&mut self) -> bool {
        if !self.state.game_over {
            return false;
        }
        self.state.restart();
        self.keys.clear();
        self.pointer_target = None;
        log::info!("Lane dodge restarted");
        true
    }

    /// Steer toward a pointer's horizontal position
    fn steer_to(&mut self, x: f32) {
        let gap = x - self.state.player_x;
        self.keys.left = gap < -POINTER_DEADZONE;
        self.keys.right = gap > POINTER_DEADZONE;
    }
}

impl Game for DodgeGame {
    fn kind(&self) -> GameKind {
        GameKind::Dodge
    }

    fn is_continuous(&self) -> bool {
        true
    }

    fn handle(&mut self, event: InputEvent) -> Option<Notice> {
        match event {
            InputEvent::KeyDown(Key::Action) => {
                self.request_restart();
            }
            InputEvent::KeyDown(key) => self.keys.press(key),
            InputEvent::KeyUp(key) => self.keys.release(key),
            InputEvent::Pointer(pos) => {
                if !self.request_restart() {
                    self.pointer_target = Some(pos.x);
                    self.steer_to(pos.x);
                }
            }
            InputEvent::PointerUp => {
                self.pointer_target = None;
                self.keys.left = false;
                self.keys.right = false;
            }
            InputEvent::Swipe(_) => {}
        }
        None
    }

    fn frame(&mut self) -> FrameControl {
        if self.run == RunState::Stopped {
            return FrameControl::Stop;
        }
        if let Some(target) = self.pointer_target {
            self.steer_to(target);
        }
        let input = DodgeInput {
            left: self.keys.left,
            right: self.keys.right,
        };
        tick(&mut self.state, &input, &mut self.rng);
        FrameControl::Continue
    }

    fn draw(&self, surface: &mut dyn Surface) {
        draw_dodge(&self.state, &self.settings, surface);
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
