#![warn(missing_docs)]

//! Math types for the ringloft engine.
//!
//! Thin wrappers around nalgebra providing the point and vector types used
//! for flat pattern geometry (2D, millimetres) and the lofted surface (3D,
//! world units), plus tolerance constants and the polar placement used to
//! put a ring sample on the body of revolution.

use nalgebra::{Vector2, Vector3};

/// A point in the flat pattern plane (mm).
pub type Point2 = nalgebra::Point2<f64>;

/// A point on the lofted surface (world units).
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in the pattern plane.
pub type Vec2 = Vector2<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in mm. Widths and circumferences at or below
    /// this are treated as zero.
    pub linear: f64,
    /// Smallest vertical extent for a segment to count as non-horizontal.
    pub horizontal: f64,
}

impl Tolerance {
    /// Default pattern tolerances (1e-6 mm linear, 1e-12 mm horizontal).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        horizontal: 1e-12,
    };

    /// Check if two pattern points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar length is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() <= self.linear
    }

    /// Check if a segment's vertical extent `dy` makes it horizontal.
    pub fn is_horizontal(&self, dy: f64) -> bool {
        dy.abs() <= self.horizontal
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Linear interpolation between `a` and `b` at parameter `t`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Place a point on a ring of the body of revolution.
///
/// The revolution axis is world Y. `radius` is in mm, `height` is already in
/// world units, and `scale` converts the radial distance from mm to world
/// units.
#[inline]
pub fn ring_point(radius: f64, theta: f64, height: f64, scale: f64) -> Point3 {
    let (s, c) = theta.sin_cos();
    Point3::new(radius * c * scale, height, radius * s * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_lerp() {
        assert!((lerp(2.0, 4.0, 0.5) - 3.0).abs() < 1e-12);
        assert!((lerp(2.0, 4.0, 0.0) - 2.0).abs() < 1e-12);
        assert!((lerp(2.0, 4.0, 1.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_ring_point_quarter_turn() {
        let p = ring_point(100.0, PI / 2.0, -0.08, 0.001);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y + 0.08).abs() < 1e-12);
        assert!((p.z - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_ring_point_radius_preserved() {
        let p = ring_point(31.0, 1.234, 0.0, 2.0);
        assert!(((p.x * p.x + p.z * p.z).sqrt() - 62.0).abs() < 1e-9);
    }

    #[test]
    fn test_tolerance() {
        let tol = Tolerance::DEFAULT;
        assert!(tol.points_equal(&Point2::new(1.0, 2.0), &Point2::new(1.0 + 1e-7, 2.0)));
        assert!(!tol.points_equal(&Point2::new(1.0, 2.0), &Point2::new(1.001, 2.0)));
        assert!(tol.is_zero(5e-7));
        assert!(!tol.is_zero(1e-3));
        assert!(tol.is_horizontal(0.0));
        assert!(!tol.is_horizontal(1e-6));
    }
}
