//! Angle helpers in compass degrees: 0 is north, angles grow clockwise.
//!
//! World space follows Bevy's convention (Y up, -Z forward), so north is -Z and
//! east is +X.

use bevy::math::{Vec2, Vec3};

/// Wrap any angle into [0, 360).
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed angle from `from` to `to`, in (-180, 180].
pub fn shortest_signed_delta(from: f32, to: f32) -> f32 {
    let delta = normalize_degrees(to - from);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Project a world vector onto the ground plane as `(east, north)`.
pub fn ground(v: Vec3) -> Vec2 {
    Vec2 { x: v.x, y: -v.z }
}

/// Bearing of a ground-plane offset `(east, north)` in [0, 360).
pub fn bearing(offset: Vec2) -> f32 {
    normalize_degrees(offset.x.atan2(offset.y).to_degrees())
}

/// Bearing from `viewer` to `target`, ignoring height.
pub fn bearing_between(viewer: Vec3, target: Vec3) -> f32 {
    bearing(ground(target - viewer))
}

/// Yaw of a forward vector. `None` when looking straight up or down.
pub fn yaw_from_forward(forward: Vec3) -> Option<f32> {
    let flat = ground(forward);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(bearing(flat))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "{a} != {b}");
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert!(normalize_degrees(-1e-10) < 360.0);
    }

    #[test]
    fn delta_range() {
        for h in (0..360).step_by(7) {
            for b in (0..360).step_by(11) {
                let d = shortest_signed_delta(h as f32, b as f32);
                assert!(d > -180.0 && d <= 180.0, "h={h} b={b} d={d}");
            }
        }
    }

    #[test]
    fn delta_wraps() {
        assert_eq!(shortest_signed_delta(350.0, 10.0), 20.0);
        assert_eq!(shortest_signed_delta(10.0, 350.0), -20.0);
        assert_eq!(shortest_signed_delta(0.0, 180.0), 180.0);
        assert_eq!(shortest_signed_delta(180.0, 0.0), 180.0);
    }

    #[test]
    fn bearings_follow_world_axes() {
        let origin = Vec3::ZERO;
        assert_close(bearing_between(origin, Vec3::NEG_Z), 0.0);
        assert_close(bearing_between(origin, Vec3::X), 90.0);
        assert_close(bearing_between(origin, Vec3::Z), 180.0);
        assert_close(bearing_between(origin, Vec3::NEG_X), 270.0);
        // height is ignored
        assert_close(bearing_between(origin, Vec3::new(1.0, 50.0, 0.0)), 90.0);
    }

    #[test]
    fn yaw() {
        assert_close(yaw_from_forward(Vec3::NEG_Z).unwrap(), 0.0);
        assert_close(yaw_from_forward(Vec3::NEG_X).unwrap(), 270.0);
        assert_eq!(yaw_from_forward(Vec3::Y), None);
    }
}
