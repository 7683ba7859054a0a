//! Data-driven game balance
//!
//! Every gameplay constant is a tunable with a default matching `crate::consts`.
//! Pages may override any subset through JSON; missing fields keep defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::dodge::{HazardKind, HazardTag};

/// Tuning load/validation failure
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn check_probability(field: &'static str, value: f32) -> Result<(), TuningError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("must be within [0, 1], got {value}")))
    }
}

/// Turn-based grid game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenTuning {
    pub grid_size: i32,
    pub flowers: usize,
    pub birds: usize,
    /// Trees and rocks; zero for the open meadow
    pub obstacles: usize,
    /// Birds step on every Nth accepted move
    pub bird_move_interval: u32,
}

impl Default for GardenTuning {
    fn default() -> Self {
        Self::thicket()
    }
}

impl GardenTuning {
    /// Open meadow: flowers and birds only
    pub fn meadow() -> Self {
        Self {
            obstacles: 0,
            ..Self::thicket()
        }
    }

    /// Meadow scattered with blocking trees and rocks
    pub fn thicket() -> Self {
        Self {
            grid_size: GRID_SIZE,
            flowers: NUM_FLOWERS,
            birds: NUM_BIRDS,
            obstacles: NUM_OBSTACLES,
            bird_move_interval: BIRD_MOVE_INTERVAL,
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.grid_size <= 0 {
            return Err(invalid("garden.grid_size", "must be at least 1"));
        }
        if self.bird_move_interval == 0 {
            return Err(invalid("garden.bird_move_interval", "must be at least 1"));
        }
        Ok(())
    }
}

/// Lane dodge balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DodgeTuning {
    pub width: f32,
    pub height: f32,
    pub player_width: f32,
    /// Horizontal pixels per tick while a direction is held
    pub player_speed: f32,
    /// Distance of the player's center above the bottom edge
    pub player_lift: f32,
    /// Initial shared fall speed
    pub start_speed: f32,
    /// Added to the fall speed every tick
    pub speed_ramp: f32,
    /// Fraction of the horizontal gap a following hazard closes per tick
    pub follow_fraction: f32,
    /// Per-tick probability of a new hazard
    pub spawn_chance: f32,
    pub despawn_margin: f32,
    pub hazards: Vec<HazardKind>,
}

impl Default for DodgeTuning {
    fn default() -> Self {
        Self {
            width: DODGE_WIDTH,
            height: DODGE_HEIGHT,
            player_width: DODGE_PLAYER_WIDTH,
            player_speed: DODGE_PLAYER_SPEED,
            player_lift: DODGE_PLAYER_LIFT,
            start_speed: DODGE_START_SPEED,
            speed_ramp: DODGE_SPEED_RAMP,
            follow_fraction: DODGE_FOLLOW_FRACTION,
            spawn_chance: DODGE_SPAWN_CHANCE,
            despawn_margin: DODGE_DESPAWN_MARGIN,
            hazards: vec![
                HazardKind {
                    tag: HazardTag::Leaf,
                    width: 30.0,
                    follows: false,
                    weight: 3,
                },
                HazardKind {
                    tag: HazardTag::Rock,
                    width: 40.0,
                    follows: false,
                    weight: 2,
                },
                HazardKind {
                    tag: HazardTag::Bird,
                    width: 36.0,
                    follows: true,
                    weight: 1,
                },
            ],
        }
    }
}

impl DodgeTuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        check_positive("dodge.width", self.width)?;
        check_positive("dodge.height", self.height)?;
        check_positive("dodge.player_width", self.player_width)?;
        if self.player_width > self.width {
            return Err(invalid("dodge.player_width", "wider than the lane"));
        }
        check_probability("dodge.follow_fraction", self.follow_fraction)?;
        check_probability("dodge.spawn_chance", self.spawn_chance)?;
        if self.hazards.iter().all(|k| k.weight == 0) {
            return Err(invalid("dodge.hazards", "needs at least one weighted kind"));
        }
        for kind in &self.hazards {
            check_positive("dodge.hazards.width", kind.width)?;
        }
        Ok(())
    }
}

/// Free roam balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoamTuning {
    pub width: f32,
    pub height: f32,
    pub start_speed: f32,
    /// Added to speed per collected flower; never reset within a session
    pub speed_bonus: f32,
    /// Contact distance for both flowers and hazards
    pub hit_radius: f32,
    pub flowers: usize,
    pub start_hazards: usize,
    /// Per-tick probability of a new hazard
    pub spawn_chance: f32,
}

impl Default for RoamTuning {
    fn default() -> Self {
        Self {
            width: ROAM_WIDTH,
            height: ROAM_HEIGHT,
            start_speed: ROAM_START_SPEED,
            speed_bonus: ROAM_SPEED_BONUS,
            hit_radius: ROAM_HIT_RADIUS,
            flowers: ROAM_FLOWERS,
            start_hazards: ROAM_START_HAZARDS,
            spawn_chance: ROAM_SPAWN_CHANCE,
        }
    }
}

impl RoamTuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        check_positive("roam.width", self.width)?;
        check_positive("roam.height", self.height)?;
        check_positive("roam.hit_radius", self.hit_radius)?;
        check_probability("roam.spawn_chance", self.spawn_chance)?;
        Ok(())
    }
}

/// Complete tuning set for all games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub garden: GardenTuning,
    pub dodge: DodgeTuning,
    pub roam: RoamTuning,
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        self.garden.validate()?;
        self.dodge.validate()?;
        self.roam.validate()
    }

    /// Parse an override, logging and falling back to defaults on failure
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert!(GardenTuning::meadow().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "roam": { "speed_bonus": 0.1 } }"#).unwrap();
        assert_eq!(tuning.roam.speed_bonus, 0.1);
        assert_eq!(tuning.roam.hit_radius, ROAM_HIT_RADIUS);
        assert_eq!(tuning.garden, GardenTuning::thicket());
        assert_eq!(tuning.dodge.hazards.len(), 3);
    }

    #[test]
    fn test_meadow_has_no_obstacles() {
        let meadow = GardenTuning::meadow();
        assert_eq!(meadow.obstacles, 0);
        assert_eq!(meadow.flowers, NUM_FLOWERS);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Tuning::from_json(r#"{ "dodge": { "spawn_chance": 1.5 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "dodge.spawn_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_bird_interval() {
        let err = Tuning::from_json(r#"{ "garden": { "bird_move_interval": 0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_unweighted_hazard_table() {
        let json = r#"{ "dodge": { "hazards": [
            { "tag": "Rock", "width": 40.0, "follows": false, "weight": 0 }
        ] } }"#;
        assert!(Tuning::from_json(json).is_err());
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
        assert_eq!(Tuning::from_json_or_default("{ not json"), Tuning::default());
    }
}
