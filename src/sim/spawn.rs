//! Random placement and spawn rolls
//!
//! All randomness flows through a caller-supplied `Rng` so sessions replay
//! exactly from a seed. Spawns are independent: nothing re-rolls a position
//! that lands on another entity.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::grid::GridPos;

/// Uniform cell on a `grid_size` square board
pub fn random_cell<R: Rng + ?Sized>(rng: &mut R, grid_size: i32) -> GridPos {
    GridPos::new(rng.random_range(0..grid_size), rng.random_range(0..grid_size))
}

/// `count` independent cells (duplicates allowed)
pub fn random_cells<R: Rng + ?Sized>(rng: &mut R, count: usize, grid_size: i32) -> Vec<GridPos> {
    (0..count).map(|_| random_cell(rng, grid_size)).collect()
}

/// Uniform point in [0, width) x [0, height)
pub fn random_point<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Vec2 {
    Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height)
}

/// Uniform value in [lo, hi], collapsing to the midpoint if the range is inverted
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..=hi)
    } else {
        (lo + hi) / 2.0
    }
}

/// Independent per-tick chance
#[inline]
pub fn roll<R: Rng + ?Sized>(rng: &mut R, probability: f32) -> bool {
    rng.random::<f32>() < probability
}

/// Something drawn from a weighted table
pub trait Weighted {
    fn weight(&self) -> u32;
}

/// Pick an entry proportionally to its weight
///
/// Returns `None` for an empty table or one whose weights are all zero.
pub fn pick_weighted<'a, T, R>(rng: &mut R, table: &'a [T]) -> Option<&'a T>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    table.choose_weighted(rng, |entry| entry.weight()).ok()
}
