//! Point helpers on top of `glam::DVec3`.
//!
//! Public angle parameters are degrees; conversion to radians happens here.

use glam::{DQuat, DVec3};

/// Rotate `p` about the line through `a` and `b` by a signed angle in
/// degrees. A degenerate axis (`a == b`) leaves the point unchanged.
pub fn rotate_about_line(p: DVec3, a: DVec3, b: DVec3, degrees: f64) -> DVec3 {
    match (b - a).try_normalize() {
        Some(axis) => a + DQuat::from_axis_angle(axis, degrees.to_radians()) * (p - a),
        None => p,
    }
}

/// Component of `v` orthogonal to `normal`. A zero normal removes nothing.
pub fn project_onto_plane(v: DVec3, normal: DVec3) -> DVec3 {
    let len_sq = normal.length_squared();
    if len_sq <= f64::EPSILON {
        return v;
    }
    v - normal * (v.dot(normal) / len_sq)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_rotate_quarter_turn_about_x() {
        let p = rotate_about_line(DVec3::Y, DVec3::ZERO, DVec3::X, 90.0);
        assert!(approx(p, DVec3::Z), "{p:?}");
    }

    #[test]
    fn test_rotate_negative_angle_reverses() {
        let p = rotate_about_line(DVec3::Y, DVec3::ZERO, DVec3::X, -90.0);
        assert!(approx(p, -DVec3::Z), "{p:?}");
    }

    #[test]
    fn test_rotate_about_offset_line() {
        // Half turn about the vertical line through (1, 0, 0).
        let a = DVec3::new(1.0, 0.0, 0.0);
        let b = DVec3::new(1.0, 1.0, 0.0);
        let p = rotate_about_line(DVec3::ZERO, a, b, 180.0);
        assert!(approx(p, DVec3::new(2.0, 0.0, 0.0)), "{p:?}");
    }

    #[test]
    fn test_rotate_preserves_distance_to_axis() {
        let a = DVec3::new(0.3, -0.2, 1.1);
        let b = DVec3::new(-0.4, 0.9, 0.6);
        let p = DVec3::new(2.0, 3.0, -1.0);
        let q = rotate_about_line(p, a, b, 37.5);
        let axis = (b - a).normalize();
        let dist = |x: DVec3| (x - a - axis * (x - a).dot(axis)).length();
        assert!((dist(p) - dist(q)).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_degenerate_axis_is_identity() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(rotate_about_line(p, DVec3::ONE, DVec3::ONE, 45.0), p);
    }

    #[test]
    fn test_projection_is_orthogonal_to_normal() {
        let v = DVec3::new(1.0, 2.0, 3.0);
        let n = DVec3::new(0.5, -1.0, 2.0);
        assert!(project_onto_plane(v, n).dot(n).abs() < 1e-9);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let v = DVec3::new(-2.0, 0.7, 1.3);
        let n = DVec3::new(1.0, 1.0, 0.0);
        let once = project_onto_plane(v, n);
        assert!(approx(project_onto_plane(once, n), once));
    }

    #[test]
    fn test_projection_zero_normal_keeps_vector() {
        let v = DVec3::new(4.0, 5.0, 6.0);
        assert_eq!(project_onto_plane(v, DVec3::ZERO), v);
    }
}
