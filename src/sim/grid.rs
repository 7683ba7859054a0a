//! Integer grid geometry for the turn-based games

use serde::{Deserialize, Serialize};

/// Unit move on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (dx, dy) with y growing downward
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// A grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamp each axis independently to [0, grid_size - 1]
    pub fn clamp(self, grid_size: i32) -> Self {
        let max = grid_size - 1;
        Self {
            x: self.x.clamp(0, max),
            y: self.y.clamp(0, max),
        }
    }

    /// One cell in `direction`, held at the board edge
    pub fn step(self, direction: Direction, grid_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy).clamp(grid_size)
    }

    /// One sign-of-delta step toward `target` on each axis
    ///
    /// Diagonal steps are allowed, so the Chebyshev distance to `target`
    /// drops by one per call until the cells coincide.
    pub fn pursue(self, target: GridPos, grid_size: i32) -> Self {
        Self::new(
            self.x + (target.x - self.x).signum(),
            self.y + (target.y - self.y).signum(),
        )
        .clamp(grid_size)
    }

    pub fn chebyshev(self, other: GridPos) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const N: i32 = 16;

    #[test]
    fn test_step_moves_one_cell() {
        let p = GridPos::new(5, 5);
        assert_eq!(p.step(Direction::Up, N), GridPos::new(5, 4));
        assert_eq!(p.step(Direction::Down, N), GridPos::new(5, 6));
        assert_eq!(p.step(Direction::Left, N), GridPos::new(4, 5));
        assert_eq!(p.step(Direction::Right, N), GridPos::new(6, 5));
    }

    #[test]
    fn test_step_holds_at_edges() {
        assert_eq!(GridPos::new(0, 0).step(Direction::Up, N), GridPos::new(0, 0));
        assert_eq!(GridPos::new(0, 0).step(Direction::Left, N), GridPos::new(0, 0));
        assert_eq!(
            GridPos::new(15, 15).step(Direction::Right, N),
            GridPos::new(15, 15)
        );
        assert_eq!(
            GridPos::new(15, 15).step(Direction::Down, N),
            GridPos::new(15, 15)
        );
    }

    #[test]
    fn test_pursue_moves_diagonally() {
        let bird = GridPos::new(0, 0);
        assert_eq!(bird.pursue(GridPos::new(5, 3), N), GridPos::new(1, 1));
        assert_eq!(bird.pursue(GridPos::new(0, 3), N), GridPos::new(0, 1));
        assert_eq!(bird.pursue(bird, N), bird);
    }

    proptest! {
        #[test]
        fn step_stays_on_board(x in 0..N, y in 0..N, d in 0usize..4) {
            let next = GridPos::new(x, y).step(Direction::ALL[d], N);
            prop_assert!((0..N).contains(&next.x));
            prop_assert!((0..N).contains(&next.y));
        }

        #[test]
        fn pursue_never_widens_gap(bx in 0..N, by in 0..N, tx in 0..N, ty in 0..N) {
            let bird = GridPos::new(bx, by);
            let target = GridPos::new(tx, ty);
            let next = bird.pursue(target, N);

            prop_assert!((next.x - bx).abs() <= 1);
            prop_assert!((next.y - by).abs() <= 1);

            let before = (tx - bx).abs();
            let after = (tx - next.x).abs();
            if before == 0 {
                prop_assert_eq!(after, 0);
            } else {
                prop_assert!(after < before);
            }

            if bird != target {
                prop_assert_eq!(next.chebyshev(target), bird.chebyshev(target) - 1);
            }
        }
    }
}
