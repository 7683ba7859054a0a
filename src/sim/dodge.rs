//! Continuous lane dodge
//!
//! The player slides along the bottom of the lane while hazards fall from
//! the top. Every hazard falls at one shared speed that creeps up each tick;
//! some kinds also drift toward the player. Score is ticks survived.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{contact_distance, first_hit};
use super::spawn::{Weighted, pick_weighted, random_between, roll};
use crate::tuning::DodgeTuning;

/// Visual/behavior tag for a falling hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardTag {
    Leaf,
    Rock,
    Bird,
}

/// One row of the hazard spawn table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardKind {
    pub tag: HazardTag,
    pub width: f32,
    /// Drifts toward the player while falling
    pub follows: bool,
    /// Relative spawn frequency
    pub weight: u32,
}

impl Weighted for HazardKind {
    fn weight(&self) -> u32 {
        self.weight
    }
}

/// A live falling hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub tag: HazardTag,
    pub pos: Vec2,
    pub width: f32,
    pub follows: bool,
}

impl Hazard {
    pub fn from_kind(kind: &HazardKind, pos: Vec2) -> Self {
        Self {
            tag: kind.tag,
            pos,
            width: kind.width,
            follows: kind.follows,
        }
    }
}

/// Latched directional input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DodgeInput {
    pub left: bool,
    pub right: bool,
}

/// Complete lane dodge state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DodgeState {
    pub tuning: DodgeTuning,
    /// Player center, horizontal
    pub player_x: f32,
    pub hazards: Vec<Hazard>,
    /// Shared fall speed, pixels per tick
    pub fall_speed: f32,
    /// Ticks survived
    pub score: u64,
    pub game_over: bool,
}

impl DodgeState {
    pub fn new(tuning: DodgeTuning) -> Self {
        Self {
            player_x: tuning.width / 2.0,
            hazards: Vec::new(),
            fall_speed: tuning.start_speed,
            score: 0,
            game_over: false,
            tuning,
        }
    }

    /// Back to the opening state with the same tuning
    pub fn restart(&mut self) {
        self.player_x = self.tuning.width / 2.0;
        self.hazards.clear();
        self.fall_speed = self.tuning.start_speed;
        self.score = 0;
        self.game_over = false;
    }

    pub fn player_y(&self) -> f32 {
        self.tuning.height - self.tuning.player_lift
    }

    pub fn player_pos(&self) -> Vec2 {
        Vec2::new(self.player_x, self.player_y())
    }

    /// Fall speed after `ticks` survived ticks
    pub fn ramped_speed(&self, ticks: u64) -> f32 {
        self.tuning.start_speed + self.tuning.speed_ramp * ticks as f32
    }

    /// Score scaled down for the HUD
    pub fn display_score(&self, divisor: u64) -> u64 {
        self.score / divisor.max(1)
    }

    fn move_player(&mut self, input: &DodgeInput) {
        let speed = self.tuning.player_speed;
        if input.left {
            self.player_x -= speed;
        }
        if input.right {
            self.player_x += speed;
        }
        let half = self.tuning.player_width / 2.0;
        self.player_x = self.player_x.clamp(half, self.tuning.width - half);
    }

    fn move_hazards(&mut self) {
        let fall = self.fall_speed;
        let follow = self.tuning.follow_fraction;
        let target_x = self.player_x;
        for hazard in &mut self.hazards {
            hazard.pos.y += fall;
            if hazard.follows {
                hazard.pos.x += (target_x - hazard.pos.x) * follow;
            }
        }

        let floor = self.tuning.height + self.tuning.despawn_margin;
        self.hazards.retain(|h| h.pos.y <= floor);
    }

    fn spawn_hazard<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Some(kind) = pick_weighted(rng, &self.tuning.hazards) else {
            log::warn!("Hazard table has no weighted kinds, skipping spawn");
            return;
        };
        let half = kind.width / 2.0;
        let x = random_between(rng, half, self.tuning.width - half);
        let hazard = Hazard::from_kind(kind, Vec2::new(x, -half));
        log::debug!("Spawned {:?} at x={:.1}", hazard.tag, x);
        self.hazards.push(hazard);
    }

    fn check_hits(&mut self) {
        let player = self.player_pos();
        let player_width = self.tuning.player_width;
        let hit = first_hit(
            player,
            self.hazards
                .iter()
                .map(|h| (h.pos, contact_distance(player_width, h.width))),
        );
        if let Some(index) = hit {
            self.game_over = true;
            log::info!(
                "Lane dodge over: hit by {:?} after {} ticks",
                self.hazards[index].tag,
                self.score
            );
        }
    }
}

/// Advance the lane by one frame
pub fn tick<R: Rng + ?Sized>(state: &mut DodgeState, input: &DodgeInput, rng: &mut R) {
    if state.game_over {
        return;
    }

    state.score += 1;
    state.move_player(input);
    state.move_hazards();
    // Derived from the tick count, never accumulated
    state.fall_speed = state.ramped_speed(state.score);

    if roll(rng, state.tuning.spawn_chance) {
        state.spawn_hazard(rng);
    }

    state.check_hits();
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn quiet_tuning() -> DodgeTuning {
        DodgeTuning {
            spawn_chance: 0.0,
            ..Default::default()
        }
    }

    fn rock(x: f32, y: f32) -> Hazard {
        Hazard {
            tag: HazardTag::Rock,
            pos: Vec2::new(x, y),
            width: 40.0,
            follows: false,
        }
    }

    #[test]
    fn test_new_centers_player() {
        let state = DodgeState::new(DodgeTuning::default());
        assert_eq!(state.player_x, 200.0);
        assert_eq!(state.player_y(), 540.0);
        assert_eq!(state.fall_speed, 2.0);
        assert!(state.hazards.is_empty());
    }

    #[test]
    fn test_speed_ramps_linearly() {
        let mut state = DodgeState::new(quiet_tuning());
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ticks = 0u64;
        for n in [1u64, 500, 501, 36_000, 108_000] {
            while ticks < n {
                tick(&mut state, &DodgeInput::default(), &mut rng);
                ticks += 1;
            }
            let expected = 2.0 + 0.001 * n as f64;
            let err = (state.fall_speed as f64 - expected).abs();
            // A one-tick slip is 1e-3; f32 rounding stays far below it
            assert!(err <= expected * 1e-6, "n={n} speed={} err={err}", state.fall_speed);
            assert_eq!(state.score, n);
        }
    }

    #[test]
    fn test_player_clamped_to_lane() {
        let mut state = DodgeState::new(quiet_tuning());
        let mut rng = Pcg32::seed_from_u64(1);
        let left = DodgeInput {
            left: true,
            right: false,
        };
        for _ in 0..100 {
            tick(&mut state, &left, &mut rng);
        }
        assert_eq!(state.player_x, 20.0);

        let right = DodgeInput {
            left: false,
            right: true,
        };
        for _ in 0..100 {
            tick(&mut state, &right, &mut rng);
        }
        assert_eq!(state.player_x, 380.0);
    }

    #[test]
    fn test_hazards_fall_at_shared_speed() {
        let mut state = DodgeState::new(quiet_tuning());
        state.hazards.push(rock(50.0, 0.0));
        state.hazards.push(rock(350.0, 100.0));
        tick(&mut state, &DodgeInput::default(), &mut Pcg32::seed_from_u64(1));
        assert_eq!(state.hazards[0].pos.y, 2.0);
        assert_eq!(state.hazards[1].pos.y, 102.0);
        assert_eq!(state.hazards[0].pos.x, 50.0);
    }

    #[test]
    fn test_follower_closes_fraction_of_gap() {
        let mut state = DodgeState::new(quiet_tuning());
        state.hazards.push(Hazard {
            tag: HazardTag::Bird,
            pos: Vec2::new(100.0, 0.0),
            width: 36.0,
            follows: true,
        });
        tick(&mut state, &DodgeInput::default(), &mut Pcg32::seed_from_u64(1));
        // Gap of 100 toward the player at x=200
        assert!((state.hazards[0].pos.x - 102.0).abs() < 1e-4);
    }

    #[test]
    fn test_offscreen_hazards_removed() {
        let mut state = DodgeState::new(quiet_tuning());
        state.hazards.push(rock(50.0, 647.0));
        state.hazards.push(rock(50.0, 649.0));
        tick(&mut state, &DodgeInput::default(), &mut Pcg32::seed_from_u64(1));
        assert_eq!(state.hazards.len(), 1);
        assert_eq!(state.hazards[0].pos.y, 649.0);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut state = DodgeState::new(quiet_tuning());
        // Lands 30px above the player center; contact distance is 40
        state.hazards.push(rock(200.0, 508.0));
        tick(&mut state, &DodgeInput::default(), &mut Pcg32::seed_from_u64(1));
        assert!(state.game_over);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = DodgeState::new(quiet_tuning());
        state.hazards.push(rock(200.0, 540.0));
        let mut rng = Pcg32::seed_from_u64(1);
        tick(&mut state, &DodgeInput::default(), &mut rng);
        assert!(state.game_over);

        let frozen = state.clone();
        for _ in 0..10 {
            tick(&mut state, &DodgeInput { left: true, right: false }, &mut rng);
        }
        assert_eq!(state.score, frozen.score);
        assert_eq!(state.player_x, frozen.player_x);
        assert_eq!(state.fall_speed, frozen.fall_speed);
        assert_eq!(state.hazards, frozen.hazards);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = DodgeState::new(DodgeTuning::default());
        let mut rng = Pcg32::seed_from_u64(77);
        for _ in 0..300 {
            tick(&mut state, &DodgeInput { left: true, right: false }, &mut rng);
        }
        state.game_over = true;
        state.hazards.push(rock(10.0, 10.0));

        state.restart();
        assert!(state.hazards.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.fall_speed, 2.0);
        assert_eq!(state.player_x, 200.0);
        assert!(!state.game_over);
    }

    #[test]
    fn test_spawns_inside_lane() {
        let tuning = DodgeTuning {
            spawn_chance: 1.0,
            ..Default::default()
        };
        let mut state = DodgeState::new(tuning);
        let mut rng = Pcg32::seed_from_u64(5);
        tick(&mut state, &DodgeInput::default(), &mut rng);
        assert_eq!(state.hazards.len(), 1);
        let h = &state.hazards[0];
        assert!(h.pos.y < 0.0);
        assert!(h.pos.x >= h.width / 2.0 && h.pos.x <= 400.0 - h.width / 2.0);
    }

    #[test]
    fn test_display_score_divides() {
        let mut state = DodgeState::new(quiet_tuning());
        state.score = 129;
        assert_eq!(state.display_score(10), 12);
        assert_eq!(state.display_score(0), 129);
    }

    proptest! {
        #[test]
        fn score_never_decreases(seed in any::<u64>(), inputs in prop::collection::vec((any::<bool>(), any::<bool>()), 1..200)) {
            let mut state = DodgeState::new(DodgeTuning::default());
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut last = state.score;
            for (left, right) in inputs {
                let was_over = state.game_over;
                tick(&mut state, &DodgeInput { left, right }, &mut rng);
                prop_assert!(state.score >= last);
                if was_over {
                    prop_assert_eq!(state.score, last);
                }
                prop_assert!(state.player_x >= 20.0 && state.player_x <= 380.0);
                last = state.score;
            }
        }
    }
}
