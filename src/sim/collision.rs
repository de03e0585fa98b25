//! Axis-aligned collision resolution
//!
//! Every entity is an axis-aligned box described by a center position and a
//! scaled half extent. Two boxes collide iff they overlap on both axes
//! independently. Boundary contact counts as a hit.

use glam::Vec2;

/// Half-extent overlap test: `|dx| <= hwA + hwB && |dy| <= hhA + hhB`
#[inline]
pub fn aabb_overlap(pos_a: Vec2, half_a: Vec2, pos_b: Vec2, half_b: Vec2) -> bool {
    let d = (pos_b - pos_a).abs();
    d.x <= half_a.x + half_b.x && d.y <= half_a.y + half_b.y
}

#[cfg(test)]
mod tests {
    use super::*;

    // Enemy-sized box (20x20) against a bullet-sized box (8x8) at scale 1
    const ENEMY_HALF: Vec2 = Vec2::splat(10.0);
    const BULLET_HALF: Vec2 = Vec2::splat(4.0);

    #[test]
    fn test_overlap_near_center() {
        // |dx|=5 <= 14, |dy|=3 <= 14
        assert!(aabb_overlap(
            Vec2::new(100.0, 100.0),
            ENEMY_HALF,
            Vec2::new(105.0, 103.0),
            BULLET_HALF,
        ));
    }

    #[test]
    fn test_separated_on_x() {
        // |dx|=20 > 14
        assert!(!aabb_overlap(
            Vec2::new(100.0, 100.0),
            ENEMY_HALF,
            Vec2::new(120.0, 100.0),
            BULLET_HALF,
        ));
    }

    #[test]
    fn test_touching_edges_count_as_hit() {
        assert!(aabb_overlap(
            Vec2::new(100.0, 100.0),
            ENEMY_HALF,
            Vec2::new(114.0, 100.0),
            BULLET_HALF,
        ));
    }

    #[test]
    fn test_symmetry() {
        let a = Vec2::new(50.0, 60.0);
        let b = Vec2::new(57.0, 55.0);
        assert_eq!(
            aabb_overlap(a, ENEMY_HALF, b, BULLET_HALF),
            aabb_overlap(b, BULLET_HALF, a, ENEMY_HALF),
        );
    }

    #[test]
    fn test_scale_widens_the_box() {
        // At scale 2 the bullet half extent doubles: |dx|=20 <= 10 + 8
        let scaled_bullet = Vec2::splat(8.0);
        assert!(!aabb_overlap(
            Vec2::new(100.0, 100.0),
            ENEMY_HALF,
            Vec2::new(120.0, 100.0),
            BULLET_HALF,
        ));
        assert!(!aabb_overlap(
            Vec2::new(100.0, 100.0),
            ENEMY_HALF,
            Vec2::new(120.0, 100.0),
            scaled_bullet,
        ));
        assert!(aabb_overlap(
            Vec2::new(100.0, 100.0),
            ENEMY_HALF,
            Vec2::new(118.0, 100.0),
            scaled_bullet,
        ));
    }
}
