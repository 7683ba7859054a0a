//! Turn-based butterfly meadow
//!
//! The butterfly moves one cell per input event. Flowers are eaten on
//! contact, trees and rocks block movement outright, and birds close in on
//! every `bird_move_interval`th accepted move. A bird landing on the
//! butterfly ends the game.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Direction, GridPos};
use super::spawn::{random_cell, random_cells};
use crate::tuning::GardenTuning;

/// Where a grid game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GardenStatus {
    Playing,
    /// Every flower eaten
    Won,
    /// Caught by a bird
    Lost,
}

/// Result of one `advance` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Game already over; nothing changed
    Ignored,
    /// Target cell holds a tree or rock; nothing changed
    Blocked,
    /// Butterfly moved and ate `collected` flowers
    Moved { collected: u32 },
}

/// Complete grid game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GardenState {
    pub tuning: GardenTuning,
    pub butterfly: GridPos,
    pub flowers: Vec<GridPos>,
    pub birds: Vec<GridPos>,
    /// Trees on even indices, rocks on odd
    pub obstacles: Vec<GridPos>,
    /// Accepted moves this game
    pub turn_count: u32,
    pub score: u64,
    pub game_over: bool,
}

impl GardenState {
    /// Lay out a fresh board
    ///
    /// Every entity lands on an independent random cell; overlaps are kept.
    pub fn new<R: Rng + ?Sized>(tuning: GardenTuning, rng: &mut R) -> Self {
        let n = tuning.grid_size;
        let butterfly = random_cell(rng, n);
        let flowers = random_cells(rng, tuning.flowers, n);
        let birds = random_cells(rng, tuning.birds, n);
        let obstacles = random_cells(rng, tuning.obstacles, n);
        Self::with_layout(tuning, butterfly, flowers, birds, obstacles)
    }

    /// Board with explicit positions
    pub fn with_layout(
        tuning: GardenTuning,
        butterfly: GridPos,
        flowers: Vec<GridPos>,
        birds: Vec<GridPos>,
        obstacles: Vec<GridPos>,
    ) -> Self {
        Self {
            tuning,
            butterfly,
            flowers,
            birds,
            obstacles,
            turn_count: 0,
            score: 0,
            game_over: false,
        }
    }

    pub fn status(&self) -> GardenStatus {
        if self.game_over {
            GardenStatus::Lost
        } else if self.flowers.is_empty() {
            GardenStatus::Won
        } else {
            GardenStatus::Playing
        }
    }

    pub fn is_blocked(&self, cell: GridPos) -> bool {
        self.obstacles.contains(&cell)
    }

    /// Remove flowers under the butterfly, scoring each
    fn eat_flowers(&mut self) -> u32 {
        let here = self.butterfly;
        let before = self.flowers.len();
        self.flowers.retain(|f| *f != here);
        let eaten = (before - self.flowers.len()) as u32;
        self.score += u64::from(eaten);
        eaten
    }

    fn move_birds(&mut self) {
        let target = self.butterfly;
        let n = self.tuning.grid_size;
        for bird in &mut self.birds {
            *bird = bird.pursue(target, n);
        }
    }

    fn check_birds(&mut self) {
        if self.birds.contains(&self.butterfly) {
            self.game_over = true;
        }
    }
}

/// Apply one directional input
///
/// Order per accepted move: eat flowers, birds pursue (on cadence), then
/// check for a bird on the butterfly.
pub fn advance(state: &mut GardenState, direction: Direction) -> MoveOutcome {
    if state.game_over {
        return MoveOutcome::Ignored;
    }

    let target = state.butterfly.step(direction, state.tuning.grid_size);
    if state.is_blocked(target) {
        log::debug!("Move {} blocked at {:?}", direction.as_str(), target);
        return MoveOutcome::Blocked;
    }

    state.butterfly = target;
    state.turn_count += 1;

    let collected = state.eat_flowers();
    // A zero cadence is treated as "every move"
    if state.turn_count % state.tuning.bird_move_interval.max(1) == 0 {
        state.move_birds();
    }
    state.check_birds();

    log::debug!(
        "Turn {}: butterfly at {:?}, score {}",
        state.turn_count,
        state.butterfly,
        state.score
    );
    MoveOutcome::Moved { collected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn board(
        butterfly: (i32, i32),
        flowers: &[(i32, i32)],
        birds: &[(i32, i32)],
        obstacles: &[(i32, i32)],
    ) -> GardenState {
        let cells = |list: &[(i32, i32)]| list.iter().map(|&(x, y)| GridPos::new(x, y)).collect();
        GardenState::with_layout(
            GardenTuning::thicket(),
            GridPos::new(butterfly.0, butterfly.1),
            cells(flowers),
            cells(birds),
            cells(obstacles),
        )
    }

    #[test]
    fn test_new_uses_tuning_counts() {
        let mut rng = Pcg32::seed_from_u64(12345);
        let state = GardenState::new(GardenTuning::thicket(), &mut rng);
        assert_eq!(state.flowers.len(), 8);
        assert_eq!(state.birds.len(), 2);
        assert_eq!(state.obstacles.len(), 10);
        assert_eq!(state.turn_count, 0);
        assert_eq!(state.score, 0);
        assert!(!state.game_over);

        let meadow = GardenState::new(GardenTuning::meadow(), &mut rng);
        assert!(meadow.obstacles.is_empty());
    }

    #[test]
    fn test_obstacle_blocks_move() {
        let mut state = board((5, 5), &[(0, 0)], &[(15, 15)], &[(6, 5)]);
        assert_eq!(advance(&mut state, Direction::Right), MoveOutcome::Blocked);
        assert_eq!(state.butterfly, GridPos::new(5, 5));
        assert_eq!(state.turn_count, 0);
    }

    #[test]
    fn test_blocked_move_does_not_advance_birds() {
        let mut state = board((5, 5), &[(0, 0)], &[(9, 9)], &[(6, 4)]);
        advance(&mut state, Direction::Up);
        advance(&mut state, Direction::Right);
        assert_eq!(state.turn_count, 1);
        assert_eq!(state.birds[0], GridPos::new(9, 9));
    }

    #[test]
    fn test_eats_flower_on_arrival() {
        let mut state = board((5, 5), &[(5, 4), (1, 1)], &[(15, 15)], &[]);
        assert_eq!(
            advance(&mut state, Direction::Up),
            MoveOutcome::Moved { collected: 1 }
        );
        assert_eq!(state.score, 1);
        assert_eq!(state.flowers, vec![GridPos::new(1, 1)]);
    }

    #[test]
    fn test_stacked_flowers_all_eaten() {
        let mut state = board((5, 5), &[(5, 6), (5, 6), (2, 2)], &[(15, 15)], &[]);
        assert_eq!(
            advance(&mut state, Direction::Down),
            MoveOutcome::Moved { collected: 2 }
        );
        assert_eq!(state.score, 2);
        assert_eq!(state.flowers.len(), 1);
    }

    #[test]
    fn test_birds_move_every_second_turn() {
        let mut state = board((5, 5), &[(0, 0)], &[(10, 12)], &[]);
        advance(&mut state, Direction::Right);
        assert_eq!(state.birds[0], GridPos::new(10, 12));
        advance(&mut state, Direction::Left);
        assert_eq!(state.birds[0], GridPos::new(9, 11));
    }

    #[test]
    fn test_zero_cadence_moves_birds_every_turn() {
        let mut state = board((5, 5), &[(0, 0)], &[(10, 12)], &[]);
        state.tuning.bird_move_interval = 0;
        advance(&mut state, Direction::Right);
        assert_eq!(state.birds[0], GridPos::new(9, 11));
        advance(&mut state, Direction::Left);
        assert_eq!(state.birds[0], GridPos::new(8, 10));
    }

    #[test]
    fn test_bird_catches_butterfly() {
        let mut state = board((5, 5), &[(0, 0)], &[(7, 7)], &[]);
        advance(&mut state, Direction::Right);
        assert!(!state.game_over);
        advance(&mut state, Direction::Down);
        assert_eq!(state.butterfly, GridPos::new(6, 6));
        assert_eq!(state.birds[0], GridPos::new(6, 6));
        assert!(state.game_over);
        assert_eq!(state.status(), GardenStatus::Lost);
    }

    #[test]
    fn test_walking_into_bird_ends_game() {
        let mut state = board((5, 5), &[(0, 0)], &[(6, 5)], &[]);
        advance(&mut state, Direction::Right);
        assert!(state.game_over);
    }

    #[test]
    fn test_game_over_freezes_everything() {
        let mut state = board((5, 5), &[(5, 3)], &[(6, 5)], &[]);
        advance(&mut state, Direction::Right);
        assert!(state.game_over);
        let snapshot = (state.butterfly, state.turn_count, state.score);

        assert_eq!(advance(&mut state, Direction::Up), MoveOutcome::Ignored);
        assert_eq!((state.butterfly, state.turn_count, state.score), snapshot);
    }

    #[test]
    fn test_win_exactly_when_last_flower_eaten() {
        let mut state = board((0, 0), &[(1, 0), (2, 0)], &[(15, 15)], &[]);
        advance(&mut state, Direction::Right);
        assert_eq!(state.status(), GardenStatus::Playing);
        advance(&mut state, Direction::Right);
        assert_eq!(state.status(), GardenStatus::Won);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_bird_catch_beats_final_flower() {
        let mut state = board((3, 5), &[(4, 4)], &[(5, 5)], &[]);
        advance(&mut state, Direction::Up);
        advance(&mut state, Direction::Right);
        assert_eq!(state.butterfly, GridPos::new(4, 4));
        assert_eq!(state.score, 1);
        assert!(state.flowers.is_empty());
        assert_eq!(state.status(), GardenStatus::Lost);
    }

    proptest! {
        #[test]
        fn butterfly_stays_on_board(seed in any::<u64>(), moves in prop::collection::vec(0usize..4, 0..64)) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut state = GardenState::new(GardenTuning::thicket(), &mut rng);
            let mut last_score = state.score;
            for m in moves {
                let before = (state.butterfly, state.turn_count);
                let outcome = advance(&mut state, Direction::ALL[m]);
                prop_assert!((0..16).contains(&state.butterfly.x));
                prop_assert!((0..16).contains(&state.butterfly.y));
                prop_assert!(state.score >= last_score);
                if outcome == MoveOutcome::Blocked {
                    prop_assert_eq!((state.butterfly, state.turn_count), before);
                }
                if let MoveOutcome::Moved { .. } = outcome {
                    prop_assert!(!state.obstacles.contains(&state.butterfly));
                }
                last_score = state.score;
            }
        }
    }
}
