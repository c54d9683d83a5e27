//! Foundation types: points and rects.
//!
//! Everything in the crate works in a top-left-origin coordinate system
//! (+x right, +y down). "Clockwise" is always meant as seen on screen in
//! that system.

use core::hash::{Hash, Hasher};
use core::ops::{Add, Div, Mul, Neg, Sub};

pub const PI: f64 = std::f64::consts::PI;

// ============================================================================
// Point
// ============================================================================

/// A 2D point (or vector) with `f64` coordinates.
///
/// [`PointD::NULL`] is the sentinel for an undefined point. It compares equal
/// to itself, which is what quad classification relies on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

impl PointD {
    /// Sentinel for an undefined point.
    pub const NULL: PointD = PointD {
        x: f64::INFINITY,
        y: f64::INFINITY,
    };

    pub const ZERO: PointD = PointD { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians, measured clockwise from +x.
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, s)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    #[inline]
    pub fn dot(self, other: PointD) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3D cross product of `self` and `other`.
    #[inline]
    pub fn cross(self, other: PointD) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance(self, other: PointD) -> f64 {
        (other - self).length()
    }

    #[inline]
    pub fn sq_distance(self, other: PointD) -> f64 {
        let d = other - self;
        d.dot(d)
    }

    /// Linear interpolation between `self` (`t = 0`) and `other` (`t = 1`).
    #[inline]
    pub fn lerp(self, other: PointD, t: f64) -> PointD {
        self + (other - self) * t
    }
}

impl Add for PointD {
    type Output = PointD;
    #[inline]
    fn add(self, rhs: PointD) -> PointD {
        PointD::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for PointD {
    type Output = PointD;
    #[inline]
    fn sub(self, rhs: PointD) -> PointD {
        PointD::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for PointD {
    type Output = PointD;
    #[inline]
    fn mul(self, rhs: f64) -> PointD {
        PointD::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for PointD {
    type Output = PointD;
    #[inline]
    fn div(self, rhs: f64) -> PointD {
        PointD::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for PointD {
    type Output = PointD;
    #[inline]
    fn neg(self) -> PointD {
        PointD::new(-self.x, -self.y)
    }
}

/// Hash an `f64` so that values comparing equal hash equally (`0.0 == -0.0`).
#[inline]
pub(crate) fn hash_f64<H: Hasher>(v: f64, state: &mut H) {
    let v = if v == 0.0 { 0.0 } else { v };
    v.to_bits().hash(state);
}

// ============================================================================
// Rect
// ============================================================================

/// An axis-aligned rectangle: `x1, y1` is the top-left corner, `x2, y2`
/// the bottom-right one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectD {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl RectD {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_origin_and_size(origin: PointD, width: f64, height: f64) -> Self {
        Self::new(origin.x, origin.y, origin.x + width, origin.y + height)
    }

    /// Rect of the given size centered at `center`.
    pub fn from_center_and_size(center: PointD, width: f64, height: f64) -> Self {
        Self::from_origin_and_size(
            PointD::new(center.x - width * 0.5, center.y - height * 0.5),
            width,
            height,
        )
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Smallest rect containing all `points`. An empty slice gives the
    /// default (zero) rect.
    pub fn bounding(points: &[PointD]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let mut r = Self::new(first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            r.x1 = r.x1.min(p.x);
            r.y1 = r.y1.min(p.y);
            r.x2 = r.x2.max(p.x);
            r.y2 = r.y2.max(p.y);
        }
        r
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_point() {
        assert!(PointD::NULL.is_null());
        assert!(!PointD::ZERO.is_null());
        assert!(!PointD::new(f64::INFINITY, 0.0).is_null());
    }

    #[test]
    fn test_point_arithmetic() {
        let a = PointD::new(1.0, 2.0);
        let b = PointD::new(3.0, -4.0);
        assert_eq!(a + b, PointD::new(4.0, -2.0));
        assert_eq!(a - b, PointD::new(-2.0, 6.0));
        assert_eq!(a * 2.0, PointD::new(2.0, 4.0));
        assert_eq!(b / 2.0, PointD::new(1.5, -2.0));
        assert_eq!(-a, PointD::new(-1.0, -2.0));
        assert_eq!(a.dot(b), -5.0);
        assert_eq!(a.cross(b), -10.0);
    }

    #[test]
    fn test_distance() {
        let a = PointD::new(0.0, 0.0);
        let b = PointD::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-10);
        assert!((a.sq_distance(b) - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_from_angle() {
        let v = PointD::from_angle(0.0);
        assert_eq!(v, PointD::new(1.0, 0.0));
        let v = PointD::from_angle(PI / 2.0);
        assert!(v.x.abs() < 1e-10);
        assert!((v.y - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_rect_from_center() {
        let r = RectD::from_center_and_size(PointD::new(1.0, 1.0), 2.0, 4.0);
        assert_eq!(r, RectD::new(0.0, -1.0, 2.0, 3.0));
        assert_eq!((r.width(), r.height()), (2.0, 4.0));
    }

    #[test]
    fn test_rect_bounding() {
        let r = RectD::bounding(&[
            PointD::new(1.0, 5.0),
            PointD::new(-2.0, 3.0),
            PointD::new(4.0, -1.0),
        ]);
        assert_eq!(r, RectD::new(-2.0, -1.0, 4.0, 5.0));
        assert_eq!(RectD::bounding(&[]), RectD::default());
    }
}
