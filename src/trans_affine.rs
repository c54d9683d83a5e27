//! Affine maps over quad corners.
//!
//! Every rigid or scaling transformation of a [`crate::quad::Quad`] is
//! expressed as a [`TransAffine`] and applied corner by corner. Maps are
//! built from a few primitives and chained with [`TransAffine::then`];
//! [`TransAffine::around`] moves the fixed point of a linear map from the
//! origin to an arbitrary anchor.

use crate::basics::PointD;

/// Affine map `x' = x*sx + y*shx + tx`, `y' = x*shy + y*sy + ty`.
///
/// With +y pointing down, [`TransAffine::rotation`] by a positive angle
/// turns clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransAffine {
    pub sx: f64,
    pub shy: f64,
    pub shx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl TransAffine {
    pub const IDENTITY: TransAffine = TransAffine {
        sx: 1.0,
        shy: 0.0,
        shx: 0.0,
        sy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn translation(offset: PointD) -> Self {
        Self {
            tx: offset.x,
            ty: offset.y,
            ..Self::IDENTITY
        }
    }

    /// Rotation by `angle` radians around the origin.
    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            sx: cos,
            shy: sin,
            shx: -sin,
            sy: cos,
            ..Self::IDENTITY
        }
    }

    /// Scaling by `fx`, `fy` around the origin.
    pub fn scaling(fx: f64, fy: f64) -> Self {
        Self {
            sx: fx,
            sy: fy,
            ..Self::IDENTITY
        }
    }

    /// `self` conjugated by a move of the origin to `anchor`: points are
    /// taken relative to `anchor`, mapped, then moved back. A linear map
    /// keeps `anchor` fixed.
    pub fn around(self, anchor: PointD) -> Self {
        Self {
            tx: self.tx + anchor.x - (anchor.x * self.sx + anchor.y * self.shx),
            ty: self.ty + anchor.y - (anchor.x * self.shy + anchor.y * self.sy),
            ..self
        }
    }

    /// Map applying `self` first, then `next`.
    pub fn then(&self, next: &TransAffine) -> Self {
        Self {
            sx: next.sx * self.sx + next.shx * self.shy,
            shy: next.shy * self.sx + next.sy * self.shy,
            shx: next.sx * self.shx + next.shx * self.sy,
            sy: next.shy * self.shx + next.sy * self.sy,
            tx: next.sx * self.tx + next.shx * self.ty + next.tx,
            ty: next.shy * self.tx + next.sy * self.ty + next.ty,
        }
    }

    #[inline]
    pub fn transform_point(&self, p: PointD) -> PointD {
        PointD::new(
            p.x * self.sx + p.y * self.shx + self.tx,
            p.x * self.shy + p.y * self.sy + self.ty,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::PI;

    fn assert_point(p: PointD, x: f64, y: f64) {
        assert!((p.x - x).abs() < 1e-10, "x: {} != {}", p.x, x);
        assert!((p.y - y).abs() < 1e-10, "y: {} != {}", p.y, y);
    }

    #[test]
    fn test_identity() {
        let m = TransAffine::IDENTITY;
        assert_point(m.transform_point(PointD::new(3.0, 4.0)), 3.0, 4.0);
        assert_eq!(m.then(&m), m);
    }

    #[test]
    fn test_translation() {
        let m = TransAffine::translation(PointD::new(10.0, -5.0));
        assert_point(m.transform_point(PointD::new(1.0, 1.0)), 11.0, -4.0);
    }

    #[test]
    fn test_rotation_is_clockwise_with_y_down() {
        // Right turns to down, down turns to left.
        let m = TransAffine::rotation(PI / 2.0);
        assert_point(m.transform_point(PointD::new(1.0, 0.0)), 0.0, 1.0);
        assert_point(m.transform_point(PointD::new(0.0, 1.0)), -1.0, 0.0);
    }

    #[test]
    fn test_rotation_around_anchor() {
        let m = TransAffine::rotation(PI).around(PointD::new(1.0, 1.0));
        assert_point(m.transform_point(PointD::new(2.0, 1.0)), 0.0, 1.0);
        assert_point(m.transform_point(PointD::new(1.0, 1.0)), 1.0, 1.0);
    }

    #[test]
    fn test_scaling_around_anchor() {
        let m = TransAffine::scaling(2.0, 3.0);
        assert_point(m.transform_point(PointD::new(1.0, 1.0)), 2.0, 3.0);

        let m = m.around(PointD::new(1.0, 1.0));
        assert_point(m.transform_point(PointD::new(1.0, 1.0)), 1.0, 1.0);
        assert_point(m.transform_point(PointD::new(2.0, 0.0)), 3.0, -2.0);
    }

    #[test]
    fn test_unit_scaling_around_anchor_is_exact() {
        let anchor = PointD::new(0.1, 1e7 / 3.0);
        let m = TransAffine::scaling(1.0, 1.0).around(anchor);
        let p = PointD::new(0.3, -7.7);
        assert_eq!(m.transform_point(p), p);
    }

    #[test]
    fn test_then_applies_left_to_right() {
        // Scale first, then translate.
        let shift = TransAffine::translation(PointD::new(1.0, 0.0));
        let m = TransAffine::scaling(2.0, 2.0).then(&shift);
        assert_point(m.transform_point(PointD::new(1.0, 1.0)), 3.0, 2.0);

        // Translate first, then scale.
        let m = shift.then(&TransAffine::scaling(2.0, 2.0));
        assert_point(m.transform_point(PointD::new(1.0, 1.0)), 4.0, 2.0);
    }

    #[test]
    fn test_around_keeps_translation() {
        let m = TransAffine::rotation(PI / 2.0)
            .then(&TransAffine::translation(PointD::new(5.0, 0.0)))
            .around(PointD::new(1.0, 0.0));
        assert_point(m.transform_point(PointD::new(1.0, 0.0)), 6.0, 0.0);
        assert_point(m.transform_point(PointD::new(2.0, 0.0)), 6.0, 1.0);
    }

    #[test]
    fn test_then_matches_sequential_application() {
        let a = TransAffine::rotation(0.3).around(PointD::new(2.0, -1.0));
        let b = TransAffine::scaling(1.5, 0.5)
            .then(&TransAffine::translation(PointD::new(4.0, 5.0)));
        let p = PointD::new(7.0, -2.0);
        let composed = a.then(&b).transform_point(p);
        let sequential = b.transform_point(a.transform_point(p));
        assert_point(composed, sequential.x, sequential.y);
    }
}
