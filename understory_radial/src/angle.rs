// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Degree helpers shared by every radial strategy.
//!
//! All angles in this crate are in degrees, measured from the positive x axis
//! toward the positive y axis. With a y-down view space that reads clockwise.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use kurbo::Vec2;

/// Tolerance used when comparing angles and spacings against zero.
pub const ANGLE_EPSILON: f64 = 1.0e-8;

/// Wrap `degrees` into `[0, 360)`.
///
/// ```
/// use understory_radial::normalize_degrees;
///
/// assert_eq!(normalize_degrees(370.0), 10.0);
/// assert_eq!(normalize_degrees(-90.0), 270.0);
/// assert_eq!(normalize_degrees(360.0), 0.0);
/// ```
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let mut wrapped = degrees % 360.0;
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    // Tiny negative inputs round up to exactly 360 after the add.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Wrap `degrees` into `[-180, 180]`.
#[must_use]
pub fn unwind_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let mut wrapped = degrees % 360.0;
    if wrapped > 180.0 {
        wrapped -= 360.0;
    } else if wrapped < -180.0 {
        wrapped += 360.0;
    }
    wrapped
}

/// Signed shortest rotation that takes `from` onto `to`, in `[-180, 180]`.
///
/// Both inputs may lie on any turn.
#[must_use]
pub fn shortest_delta_degrees(from: f64, to: f64) -> f64 {
    unwind_degrees(to - from)
}

/// Linear interpolation between `a` and `b`.
#[inline]
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Offset of length `radius` in direction `degrees`.
#[must_use]
pub fn polar_offset(radius: f64, degrees: f64) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()) * radius
}

/// Direction of `v` in degrees, in `[-180, 180]`.
#[must_use]
pub fn direction_degrees(v: Vec2) -> f64 {
    v.y.atan2(v.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_stays_in_range() {
        for a in [-1080.5, -360.0, -0.0, -1.0e-18, 0.0, 359.999, 360.0, 725.0] {
            let n = normalize_degrees(a);
            assert!((0.0..360.0).contains(&n), "{a} -> {n}");
            assert_eq!(normalize_degrees(n), n);
        }
    }

    #[test]
    fn normalize_rejects_non_finite() {
        assert_eq!(normalize_degrees(f64::NAN), 0.0);
        assert_eq!(normalize_degrees(f64::INFINITY), 0.0);
    }

    #[test]
    fn unwind_maps_into_half_turns() {
        assert_eq!(unwind_degrees(190.0), -170.0);
        assert_eq!(unwind_degrees(-190.0), 170.0);
        assert_eq!(unwind_degrees(720.0 + 45.0), 45.0);
        assert_eq!(unwind_degrees(180.0), 180.0);
    }

    #[test]
    fn shortest_delta_crosses_zero() {
        assert_eq!(shortest_delta_degrees(350.0, 10.0), 20.0);
        assert_eq!(shortest_delta_degrees(10.0, 350.0), -20.0);
        assert_eq!(shortest_delta_degrees(-170.0, 170.0), -20.0);
    }

    #[test]
    fn polar_offset_axes() {
        let right = polar_offset(2.0, 0.0);
        assert!((right.x - 2.0).abs() < 1e-12);
        assert!(right.y.abs() < 1e-12);

        let down = polar_offset(3.0, 90.0);
        assert!(down.x.abs() < 1e-12);
        assert!((down.y - 3.0).abs() < 1e-12);

        assert!((direction_degrees(down) - 90.0).abs() < 1e-12);
    }
}
