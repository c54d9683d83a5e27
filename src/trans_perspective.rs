//! Projective maps from the unit square onto a quad.
//!
//! [`crate::quad::Quad::transform`] hands out a [`TransPerspective`] so that
//! texture coordinates in `[0, 1]²` can be placed inside a quad.

use crate::basics::PointD;

/// 3×3 projective matrix.
///
/// ```text
/// | sx  shy  w0 |
/// | shx  sy  w1 |
/// | tx   ty  w2 |
/// ```
///
/// A point maps as `x' = (x*sx + y*shx + tx) / w`, `y' = (x*shy + y*sy + ty) / w`
/// with `w = x*w0 + y*w1 + w2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransPerspective {
    pub sx: f64,
    pub shy: f64,
    pub w0: f64,
    pub shx: f64,
    pub sy: f64,
    pub w1: f64,
    pub tx: f64,
    pub ty: f64,
    pub w2: f64,
}

impl TransPerspective {
    /// Map the unit square onto the quadrilateral `q`, so that `(0,0)`,
    /// `(1,0)`, `(1,1)` and `(0,1)` land on `q[0]`, `q[1]`, `q[2]` and `q[3]`.
    ///
    /// `None` if the mapping is singular, e.g. when three corners are
    /// collinear or two coincide.
    pub fn square_to_quad(q: &[PointD; 4]) -> Option<Self> {
        let e1 = q[1] - q[0];
        let e3 = q[3] - q[0];
        // Zero for parallelograms, which need no perspective terms.
        let skew = q[0] - q[1] + q[2] - q[3];

        let (u, v) = if skew == PointD::ZERO {
            (0.0, 0.0)
        } else {
            let a = q[1] - q[2];
            let b = q[3] - q[2];
            let den = a.cross(b);
            if den == 0.0 {
                return None;
            }
            (skew.cross(b) / den, a.cross(skew) / den)
        };

        let m = Self {
            sx: e1.x + u * q[1].x,
            shy: e1.y + u * q[1].y,
            w0: u,
            shx: e3.x + v * q[3].x,
            sy: e3.y + v * q[3].y,
            w1: v,
            tx: q[0].x,
            ty: q[0].y,
            w2: 1.0,
        };

        let det = m.determinant();
        (det != 0.0 && det.is_finite()).then_some(m)
    }

    /// Maps `p` with the perspective divide.
    #[inline]
    pub fn transform_point(&self, p: PointD) -> PointD {
        let w = p.x * self.w0 + p.y * self.w1 + self.w2;
        PointD::new(
            (p.x * self.sx + p.y * self.shx + self.tx) / w,
            (p.x * self.shy + p.y * self.sy + self.ty) / w,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.sx * (self.sy * self.w2 - self.ty * self.w1)
            + self.shx * (self.ty * self.w0 - self.shy * self.w2)
            + self.tx * (self.shy * self.w1 - self.sy * self.w0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> PointD {
        PointD::new(x, y)
    }

    fn assert_maps(t: &TransPerspective, from: PointD, to: PointD) {
        let r = t.transform_point(from);
        assert!((r.x - to.x).abs() < 1e-8, "{:?} -> {:?}, expected {:?}", from, r, to);
        assert!((r.y - to.y).abs() < 1e-8, "{:?} -> {:?}, expected {:?}", from, r, to);
    }

    #[test]
    fn test_square_to_unit_square_is_identity() {
        let q = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        let t = TransPerspective::square_to_quad(&q).unwrap();
        assert_eq!((t.sx, t.shy, t.w0), (1.0, 0.0, 0.0));
        assert_eq!((t.shx, t.sy, t.w1), (0.0, 1.0, 0.0));
        assert_eq!((t.tx, t.ty, t.w2), (0.0, 0.0, 1.0));
        assert!((t.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_square_to_quad_parallelogram() {
        let q = [p(0.0, 0.0), p(10.0, 0.0), p(12.0, 10.0), p(2.0, 10.0)];
        let t = TransPerspective::square_to_quad(&q).unwrap();
        assert_eq!(t.w0, 0.0);
        assert_eq!(t.w1, 0.0);
        assert_maps(&t, p(0.5, 0.5), p(6.0, 5.0));
        assert_maps(&t, p(1.0, 1.0), q[2]);
    }

    #[test]
    fn test_square_to_quad_perspective_corners() {
        let q = [p(0.0, 0.0), p(10.0, 1.0), p(9.0, 10.0), p(1.0, 9.0)];
        let t = TransPerspective::square_to_quad(&q).unwrap();
        assert!(t.w0 != 0.0 || t.w1 != 0.0);
        assert_maps(&t, p(0.0, 0.0), q[0]);
        assert_maps(&t, p(1.0, 0.0), q[1]);
        assert_maps(&t, p(1.0, 1.0), q[2]);
        assert_maps(&t, p(0.0, 1.0), q[3]);
    }

    #[test]
    fn test_square_to_quad_keeps_edges_straight() {
        let q = [p(0.0, 0.0), p(10.0, 1.0), p(9.0, 10.0), p(1.0, 9.0)];
        let t = TransPerspective::square_to_quad(&q).unwrap();
        let mid = t.transform_point(p(0.5, 0.0));
        assert!((q[1] - q[0]).cross(mid - q[0]).abs() < 1e-8);
    }

    #[test]
    fn test_square_to_quad_singular() {
        let q = [p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)];
        assert!(TransPerspective::square_to_quad(&q).is_none());
        let q = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(1.0, 1.0)];
        assert!(TransPerspective::square_to_quad(&q).is_none());
    }
}
