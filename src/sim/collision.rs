//! Distance-based collision helpers for the continuous games
//!
//! Sprites are treated as circles: two of them touch when the distance
//! between their centers is strictly below a contact threshold.

use glam::Vec2;

use crate::wrap_coord;

/// True when `a` and `b` are closer than `threshold`
#[inline]
pub fn within(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance_squared(b) < threshold * threshold
}

/// Contact threshold for two sprites of the given widths
#[inline]
pub fn contact_distance(width_a: f32, width_b: f32) -> f32 {
    (width_a + width_b) / 2.0
}

/// Index of the first `(center, threshold)` pair touching `point`
///
/// Checks stop at the first hit, so later entries are never examined.
pub fn first_hit<I>(point: Vec2, others: I) -> Option<usize>
where
    I: IntoIterator<Item = (Vec2, f32)>,
{
    others
        .into_iter()
        .position(|(center, threshold)| within(point, center, threshold))
}

/// Wrap a position onto a torus of the given size
#[inline]
pub fn wrap(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_coord(pos.x, width), wrap_coord(pos.y, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_within_is_strict() {
        let a = Vec2::new(0.0, 0.0);
        assert!(within(a, Vec2::new(19.9, 0.0), 20.0));
        assert!(!within(a, Vec2::new(20.0, 0.0), 20.0));
        assert!(within(a, Vec2::new(10.0, 10.0), 20.0));
    }

    #[test]
    fn test_contact_distance_is_half_sum() {
        assert_eq!(contact_distance(40.0, 30.0), 35.0);
    }

    #[test]
    fn test_first_hit_returns_earliest() {
        let point = Vec2::new(100.0, 100.0);
        let others = [
            (Vec2::new(0.0, 0.0), 10.0),
            (Vec2::new(105.0, 100.0), 10.0),
            (Vec2::new(100.0, 101.0), 10.0),
        ];
        assert_eq!(first_hit(point, others), Some(1));
        assert_eq!(first_hit(point, [(Vec2::ZERO, 10.0)]), None);
    }

    #[test]
    fn test_wrap_crosses_edges() {
        let wrapped = wrap(Vec2::new(-2.0, 605.0), 800.0, 600.0);
        assert_eq!(wrapped, Vec2::new(798.0, 5.0));
        assert_eq!(wrap(Vec2::new(800.0, 0.0), 800.0, 600.0), Vec2::new(0.0, 0.0));
    }

    proptest! {
        #[test]
        fn wrap_lands_on_canvas(x in -5000.0f32..5000.0, y in -5000.0f32..5000.0) {
            let p = wrap(Vec2::new(x, y), 800.0, 600.0);
            prop_assert!(p.x >= 0.0 && p.x < 800.0);
            prop_assert!(p.y >= 0.0 && p.y < 600.0);
        }
    }
}
