//! Turn-based grid controller

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{FrameControl, Game, GameKind, InputEvent, Notice, RunState};
use crate::input::Key;
use crate::renderer::{Surface, draw_garden};
use crate::settings::Settings;
use crate::sim::{Direction, GardenState, GardenStatus, MoveOutcome, advance};
use crate::tuning::GardenTuning;

pub struct GardenGame {
    kind: GameKind,
    state: GardenState,
    rng: Pcg32,
    settings: Settings,
    run: RunState,
}

impl GardenGame {
    pub fn new(kind: GameKind, tuning: GardenTuning, settings: Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GardenState::new(tuning, &mut rng);
        Self {
            kind,
            state,
            rng,
            settings,
            run: RunState::Running,
        }
    }

    /// Wrap an existing board
    pub fn from_state(kind: GameKind, state: GardenState, settings: Settings, seed: u64) -> Self {
        Self {
            kind,
            state,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            run: RunState::Running,
        }
    }

    pub fn state(&self) -> &GardenState {
        &self.state
    }

    /// Fresh board from the same RNG stream
    pub fn restart(&mut self) {
        self.state = GardenState::new(self.state.tuning.clone(), &mut self.rng);
        log::info!("{} restarted", self.kind.as_str());
    }

    /// Move, then report a notice if the move finished the game
    pub fn step(&mut self, direction: Direction) -> Option<Notice> {
        if self.run == RunState::Stopped {
            return None;
        }

        let before = self.state.status();
        let outcome = advance(&mut self.state, direction);
        if !matches!(outcome, MoveOutcome::Moved { .. }) {
            return None;
        }

        let score = self.state.score;
        match self.state.status() {
            status if status == before => None,
            GardenStatus::Lost => {
                log::info!("Caught by a bird, score {score}");
                Some(Notice::GameOver { score })
            }
            GardenStatus::Won => {
                log::info!("All flowers eaten, score {score}");
                Some(Notice::Win { score })
            }
            GardenStatus::Playing => None,
        }
    }
}

impl Game for GardenGame {
    fn kind(&self) -> GameKind {
        self.kind
    }

    fn is_continuous(&self) -> bool {
        false
    }

    fn handle(&mut self, event: InputEvent) -> Option<Notice> {
        match event {
            InputEvent::KeyDown(Key::Action) => {
                if self.state.status() != GardenStatus::Playing {
                    self.restart();
                }
                None
            }
            InputEvent::KeyDown(key) => key.direction().and_then(|d| self.step(d)),
            InputEvent::Swipe(direction) => self.step(direction),
            InputEvent::KeyUp(_) | InputEvent::Pointer(_) | InputEvent::PointerUp => None,
        }
    }

    fn frame(&mut self) -> FrameControl {
        FrameControl::Stop
    }

    fn draw(&self, surface: &mut dyn Surface) {
        draw_garden(&self.state, &self.settings, surface);
    }

    fn canvas_size(&self) -> (f32, f32) {
        let side = self.settings.grid_canvas_px;
        (side, side)
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
