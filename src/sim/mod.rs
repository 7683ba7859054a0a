//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per input event (grid games) or per frame (continuous games)
//! - Randomness only through a caller-supplied `Rng`
//! - Stable iteration order (entities keep insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod dodge;
pub mod garden;
pub mod grid;
pub mod roam;
pub mod spawn;

pub use collision::{contact_distance, first_hit, within, wrap};
pub use dodge::{DodgeInput, DodgeState, Hazard, HazardKind, HazardTag};
pub use garden::{GardenState, GardenStatus, MoveOutcome, advance};
pub use grid::{Direction, GridPos};
pub use roam::{RoamInput, RoamState};
pub use spawn::{Weighted, pick_weighted, random_cell, random_cells, random_point, roll};
