//! Quadrilaterals.
//!
//! [`Quad`] is an immutable value holding four ordered corners `v0..v3`.
//! Its [`QuadType`] is computed once, when the quad is created, and every
//! "mutating" operation returns a new quad.
//!
//! Corner order convention: for a rect, `v0` is the top-left corner,
//! followed by top-right, bottom-right and bottom-left. With +y pointing
//! down this order is clockwise on screen.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::BitOr;

use crate::basics::{hash_f64, PointD, RectD, PI};
use crate::math::{
    convex_hull, cross_product, intersection_exists, nearest_points_on_polylines,
    point_on_edge_closest_to_point, points_are_collinear, shoelace_sum, VERTEX_DIST_EPSILON,
};
use crate::trans_affine::TransAffine;
use crate::trans_perspective::TransPerspective;

/// Number of corners of a quad.
pub const NUM_QUAD_CORNERS: usize = 4;

/// Corners closer to each other than this are reported as
/// [`CornersValidity::InvalidDueToProximity`].
pub const MIN_CORNER_DISTANCE: f64 = 1e-6;

/// Ordered corners of a quad.
pub type QuadCorners = [PointD; NUM_QUAD_CORNERS];

// ============================================================================
// CornerRegion
// ============================================================================

/// Set of quad corners, used to move a subset of the corners of a quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CornerRegion(u8);

impl CornerRegion {
    pub const NONE: CornerRegion = CornerRegion(0);
    pub const V0: CornerRegion = CornerRegion(1 << 0);
    pub const V1: CornerRegion = CornerRegion(1 << 1);
    pub const V2: CornerRegion = CornerRegion(1 << 2);
    pub const V3: CornerRegion = CornerRegion(1 << 3);
    pub const ALL: CornerRegion = CornerRegion(0b1111);

    /// Region holding only the corner with the given index (0..4).
    pub fn corner(index: usize) -> CornerRegion {
        debug_assert!(index < NUM_QUAD_CORNERS);
        CornerRegion(1 << index)
    }

    /// Whether the corner with the given index is part of the region.
    #[inline]
    pub fn contains_corner(self, index: usize) -> bool {
        self.0 & (1 << index) != 0
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for CornerRegion {
    type Output = CornerRegion;
    fn bitor(self, rhs: CornerRegion) -> CornerRegion {
        CornerRegion(self.0 | rhs.0)
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Shape class of a quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuadType {
    /// At least one corner is [`PointD::NULL`].
    Null,
    /// Coinciding or collinear corners that do not form a triangle.
    Degenerate,
    /// Exactly one pair of adjacent corners coincides; the rest form a
    /// proper triangle.
    Triangle,
    ConvexClockwise,
    ConvexCounterClockwise,
    ConcaveClockwise,
    ConcaveCounterClockwise,
    /// Self-intersecting ("bowtie").
    Complex,
}

/// Suitability of a set of corners for describing a simple, clockwise,
/// well-separated quad. Informational: [`Quad`] itself accepts any corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CornersValidity {
    Valid,
    InvalidDueToNull,
    InvalidDueToOrder,
    InvalidDueToCollinearity,
    InvalidDueToProximity,
}

fn classify(v: &QuadCorners) -> QuadType {
    if v.iter().any(PointD::is_null) {
        return QuadType::Null;
    }

    let coincide = |a: usize, b: usize| v[a].distance(v[b]) <= VERTEX_DIST_EPSILON;
    let adjacent: Vec<usize> = (0..NUM_QUAD_CORNERS)
        .filter(|&i| coincide(i, (i + 1) % NUM_QUAD_CORNERS))
        .collect();
    let diagonal = coincide(0, 2) || coincide(1, 3);

    if !adjacent.is_empty() || diagonal {
        if adjacent.len() == 1 && !diagonal {
            let skip = adjacent[0];
            let rest: Vec<PointD> = (0..NUM_QUAD_CORNERS)
                .filter(|&i| i != skip)
                .map(|i| v[i])
                .collect();
            if !points_are_collinear(&rest) {
                return QuadType::Triangle;
            }
        }
        return QuadType::Degenerate;
    }

    if points_are_collinear(v) {
        return QuadType::Degenerate;
    }

    if intersection_exists(v[0], v[1], v[2], v[3]) || intersection_exists(v[1], v[2], v[3], v[0])
    {
        return QuadType::Complex;
    }

    let clockwise = shoelace_sum(v) >= 0.0;

    let mut positive = false;
    let mut negative = false;
    for i in 0..NUM_QUAD_CORNERS {
        let c = cross_product(
            v[i],
            v[(i + 1) % NUM_QUAD_CORNERS],
            v[(i + 2) % NUM_QUAD_CORNERS],
        );
        positive |= c > 0.0;
        negative |= c < 0.0;
    }
    let convex = !(positive && negative);

    match (convex, clockwise) {
        (true, true) => QuadType::ConvexClockwise,
        (true, false) => QuadType::ConvexCounterClockwise,
        (false, true) => QuadType::ConcaveClockwise,
        (false, false) => QuadType::ConcaveCounterClockwise,
    }
}

// ============================================================================
// SimilarityFit
// ============================================================================

/// Translation, clockwise rotation around the quad center, and uniform
/// scaling around the quad center, applied in that order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityFit {
    pub translation: PointD,
    /// Radians in `[0, 2π)`.
    pub rotation: f64,
    pub scaling: f64,
}

impl SimilarityFit {
    /// The fit as one affine map, for a source quad centered at
    /// `source_center`.
    pub fn to_affine(&self, source_center: PointD) -> TransAffine {
        let target_center = source_center + self.translation;
        TransAffine::translation(self.translation)
            .then(&TransAffine::rotation(self.rotation).around(target_center))
            .then(&TransAffine::scaling(self.scaling, self.scaling).around(target_center))
    }
}

// ============================================================================
// Quad
// ============================================================================

/// Immutable quadrilateral.
///
/// Construction never fails and stores the corners verbatim. Whether the
/// corners describe a meaningful quad is answered by the classification
/// predicates ([`Quad::is_null`], [`Quad::is_degenerate`],
/// [`Quad::is_self_intersecting`], ...), which callers check before relying
/// on area or transform semantics.
///
/// Equality compares corners exactly and hashing agrees with it, so quads
/// can key hash maps. Corners are expected to be numbers or
/// [`PointD::NULL`]; a quad with a NaN coordinate is not equal to itself.
#[derive(Clone, Copy)]
pub struct Quad {
    corners: QuadCorners,
    quad_type: QuadType,
}

impl Quad {
    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    /// Quad with the given corners.
    pub fn new(v0: PointD, v1: PointD, v2: PointD, v3: PointD) -> Self {
        Self::from_corners([v0, v1, v2, v3])
    }

    /// Quad with the given corners.
    pub fn from_corners(corners: QuadCorners) -> Self {
        Self {
            quad_type: classify(&corners),
            corners,
        }
    }

    /// The null quad: all corners are [`PointD::NULL`].
    pub fn null() -> Self {
        Self {
            corners: [PointD::NULL; NUM_QUAD_CORNERS],
            quad_type: QuadType::Null,
        }
    }

    /// Quad with the corners of `rect`: top-left, top-right, bottom-right,
    /// bottom-left.
    pub fn from_rect(rect: RectD) -> Self {
        Self::new(
            PointD::new(rect.x1, rect.y1),
            PointD::new(rect.x2, rect.y1),
            PointD::new(rect.x2, rect.y2),
            PointD::new(rect.x1, rect.y2),
        )
    }

    pub fn from_rect_with_origin_and_size(origin: PointD, width: f64, height: f64) -> Self {
        Self::from_rect(RectD::from_origin_and_size(origin, width, height))
    }

    /// Rect of the given size centered at `center`, rotated clockwise by
    /// `angle` radians around its center.
    pub fn from_rotated_rect(center: PointD, width: f64, height: f64, angle: f64) -> Self {
        Self::from_rect(RectD::from_center_and_size(center, width, height))
            .rotated_around_point(angle, center)
    }

    /// The unit square `(0,0), (1,0), (1,1), (0,1)`.
    pub fn canonical_square() -> Self {
        Self::from_rect(RectD::new(0.0, 0.0, 1.0, 1.0))
    }

    /// Reports whether `corners` describe a simple, clockwise quad whose
    /// corners are well separated.
    pub fn validity_of_corners(corners: &QuadCorners) -> CornersValidity {
        if corners.iter().any(PointD::is_null) {
            return CornersValidity::InvalidDueToNull;
        }
        for i in 0..NUM_QUAD_CORNERS {
            for j in (i + 1)..NUM_QUAD_CORNERS {
                if corners[i].distance(corners[j]) < MIN_CORNER_DISTANCE {
                    return CornersValidity::InvalidDueToProximity;
                }
            }
        }
        if points_are_collinear(corners) {
            return CornersValidity::InvalidDueToCollinearity;
        }
        match classify(corners) {
            QuadType::ConvexCounterClockwise | QuadType::ConcaveCounterClockwise => {
                CornersValidity::InvalidDueToOrder
            }
            _ => CornersValidity::Valid,
        }
    }

    // ------------------------------------------------------------------------
    // Corners
    // ------------------------------------------------------------------------

    #[inline]
    pub fn corners(&self) -> QuadCorners {
        self.corners
    }

    #[inline]
    pub fn v0(&self) -> PointD {
        self.corners[0]
    }

    #[inline]
    pub fn v1(&self) -> PointD {
        self.corners[1]
    }

    #[inline]
    pub fn v2(&self) -> PointD {
        self.corners[2]
    }

    #[inline]
    pub fn v3(&self) -> PointD {
        self.corners[3]
    }

    /// Edges `(v0,v1), (v1,v2), (v2,v3), (v3,v0)`.
    pub fn edges(&self) -> [(PointD, PointD); NUM_QUAD_CORNERS] {
        let v = &self.corners;
        [(v[0], v[1]), (v[1], v[2]), (v[2], v[3]), (v[3], v[0])]
    }

    // ------------------------------------------------------------------------
    // Classification
    // ------------------------------------------------------------------------

    #[inline]
    pub fn quad_type(&self) -> QuadType {
        self.quad_type
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.quad_type == QuadType::Null
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.quad_type == QuadType::Degenerate
    }

    #[inline]
    pub fn is_triangular(&self) -> bool {
        self.quad_type == QuadType::Triangle
    }

    /// `true` for triangles and convex quads of either winding.
    #[inline]
    pub fn is_convex(&self) -> bool {
        matches!(
            self.quad_type,
            QuadType::Triangle | QuadType::ConvexClockwise | QuadType::ConvexCounterClockwise
        )
    }

    /// `true` only for [`QuadType::Complex`]. Degenerate and triangular quads
    /// are not considered self-intersecting.
    #[inline]
    pub fn is_self_intersecting(&self) -> bool {
        self.quad_type == QuadType::Complex
    }

    /// `true` for simple quads whose corners run clockwise (+y down).
    #[inline]
    pub fn is_clockwise(&self) -> bool {
        matches!(
            self.quad_type,
            QuadType::ConvexClockwise | QuadType::ConcaveClockwise
        )
    }

    // ------------------------------------------------------------------------
    // Derived properties
    // ------------------------------------------------------------------------

    /// Mean of the four corners.
    pub fn center(&self) -> PointD {
        let v = &self.corners;
        (v[0] + v[1] + v[2] + v[3]) / 4.0
    }

    /// Absolute shoelace area. Zero for null and degenerate quads; for
    /// self-intersecting quads the lobes of opposite winding cancel.
    pub fn area(&self) -> f64 {
        match self.quad_type {
            QuadType::Null | QuadType::Degenerate => 0.0,
            _ => shoelace_sum(&self.corners).abs() * 0.5,
        }
    }

    /// Axis-aligned rect bounding the corners.
    pub fn bounding_rect(&self) -> RectD {
        RectD::bounding(&self.corners)
    }

    pub fn minimum_edge_length(&self) -> f64 {
        self.edge_lengths().into_iter().fold(f64::INFINITY, f64::min)
    }

    pub fn maximum_edge_length(&self) -> f64 {
        self.edge_lengths().into_iter().fold(0.0, f64::max)
    }

    fn edge_lengths(&self) -> [f64; NUM_QUAD_CORNERS] {
        self.edges().map(|(a, b)| a.distance(b))
    }

    /// Convex hull of the corners, clockwise, with three or four points for
    /// non-degenerate quads.
    pub fn convex_hull(&self) -> Vec<PointD> {
        if self.is_null() {
            return Vec::new();
        }
        convex_hull(&self.corners)
    }

    /// Projective matrix mapping the unit square onto this quad, so that
    /// `(0,0)`, `(1,0)`, `(1,1)` and `(0,1)` land on `v0`, `v1`, `v2` and
    /// `v3`. Used to map texture coordinates.
    ///
    /// `None` for null and degenerate quads, and for any quad whose mapping
    /// is singular (triangles included).
    pub fn transform(&self) -> Option<TransPerspective> {
        match self.quad_type {
            QuadType::Null | QuadType::Degenerate => None,
            _ => TransPerspective::square_to_quad(&self.corners),
        }
    }

    // ------------------------------------------------------------------------
    // Transformations
    // ------------------------------------------------------------------------

    fn map_corners(&self, f: impl Fn(usize, PointD) -> PointD) -> Quad {
        if self.is_null() {
            return *self;
        }
        let mut corners = self.corners;
        for (i, c) in corners.iter_mut().enumerate() {
            *c = f(i, *c);
        }
        Quad::from_corners(corners)
    }

    /// Quad translated by `translation`.
    pub fn translated_by(&self, translation: PointD) -> Quad {
        self.translated_corners_by(translation, CornerRegion::ALL)
    }

    /// Quad with the corners in `region` translated by `translation`; the
    /// remaining corners are copied verbatim.
    pub fn translated_corners_by(&self, translation: PointD, region: CornerRegion) -> Quad {
        self.map_corners(|i, c| {
            if region.contains_corner(i) {
                c + translation
            } else {
                c
            }
        })
    }

    /// Quad scaled uniformly by `factor` around its center.
    pub fn scaled_by(&self, factor: f64) -> Quad {
        self.scaled_around(factor, self.center())
    }

    /// Quad scaled by `fx`, `fy` around its center.
    pub fn scaled_by_xy(&self, fx: f64, fy: f64) -> Quad {
        self.scaled_around_xy(fx, fy, self.center())
    }

    /// Quad scaled uniformly by `factor` around `anchor`.
    pub fn scaled_around(&self, factor: f64, anchor: PointD) -> Quad {
        self.scaled_around_xy(factor, factor, anchor)
    }

    /// Quad scaled by `fx`, `fy` around `anchor`.
    pub fn scaled_around_xy(&self, fx: f64, fy: f64, anchor: PointD) -> Quad {
        self.transformed_by_affine(&TransAffine::scaling(fx, fy).around(anchor))
    }

    /// Quad rotated clockwise (+y down) by `angle` radians around `anchor`.
    pub fn rotated_around_point(&self, angle: f64, anchor: PointD) -> Quad {
        if angle == 0.0 {
            return *self;
        }
        self.transformed_by_affine(&TransAffine::rotation(angle).around(anchor))
    }

    /// Quad with every corner mapped through the affine matrix `m`.
    pub fn transformed_by_affine(&self, m: &TransAffine) -> Quad {
        self.map_corners(|_, c| m.transform_point(c))
    }

    /// Quad with every corner mapped through the projective matrix `m`,
    /// including the homogeneous divide.
    pub fn transformed_by_perspective(&self, m: &TransPerspective) -> Quad {
        self.map_corners(|_, c| m.transform_point(c))
    }

    /// Quad whose corners are the corners of `rect` mapped through
    /// [`Quad::transform`]. The null quad if this quad has no transform.
    pub fn quad_from_transformed_rect(&self, rect: RectD) -> Quad {
        match self.transform() {
            Some(m) => Quad::from_rect(rect).transformed_by_perspective(&m),
            None => Quad::null(),
        }
    }

    // ------------------------------------------------------------------------
    // Comparison
    // ------------------------------------------------------------------------

    /// Whether every corner lies within `deviation` of the corresponding
    /// corner of `other`. Corners are compared index by index.
    pub fn is_similar_to_quad_up_to_deviation(&self, other: &Quad, deviation: f64) -> bool {
        self.corners
            .iter()
            .zip(other.corners.iter())
            .all(|(a, b)| a == b || a.distance(*b) <= deviation)
    }

    /// Finds a translation, followed by a clockwise rotation around the
    /// center and a uniform scaling around the center, that maps this quad
    /// onto `other` with every corner within `deviation`.
    ///
    /// The parameters are the least-squares fit over the four corner
    /// correspondences. Returns `None` if even the best fit leaves a corner
    /// further than `deviation` away.
    pub fn is_transformable_to_quad_with_deviation(
        &self,
        other: &Quad,
        deviation: f64,
    ) -> Option<SimilarityFit> {
        if self.is_null() || other.is_null() {
            return None;
        }

        let source_center = self.center();
        let target_center = other.center();
        let translation = target_center - source_center;

        let mut dot_sum = 0.0;
        let mut cross_sum = 0.0;
        let mut norm_sum = 0.0;
        for (s, t) in self.corners.iter().zip(other.corners.iter()) {
            let u = *s - source_center;
            let w = *t - target_center;
            dot_sum += u.dot(w);
            cross_sum += u.cross(w);
            norm_sum += u.dot(u);
        }

        let (rotation, scaling) = if norm_sum == 0.0 {
            (0.0, 1.0)
        } else if dot_sum == 0.0 && cross_sum == 0.0 {
            (0.0, 0.0)
        } else {
            let rotation = cross_sum.atan2(dot_sum).rem_euclid(2.0 * PI);
            let scaling = (dot_sum * dot_sum + cross_sum * cross_sum).sqrt() / norm_sum;
            (rotation, scaling)
        };

        let fit = SimilarityFit {
            translation,
            rotation,
            scaling,
        };
        self.transformed_by_affine(&fit.to_affine(source_center))
            .is_similar_to_quad_up_to_deviation(other, deviation)
            .then_some(fit)
    }

    // ------------------------------------------------------------------------
    // Point containment / relation
    // ------------------------------------------------------------------------

    /// Even-odd point-in-polygon test over the corners in order. Always
    /// `false` for the null quad.
    pub fn contains_point(&self, point: PointD) -> bool {
        if self.is_null() {
            return false;
        }
        let v = &self.corners;
        let mut inside = false;
        let mut j = NUM_QUAD_CORNERS - 1;
        for i in 0..NUM_QUAD_CORNERS {
            let a = v[i];
            let b = v[j];
            if (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Whether this quad contains at least one corner of `other`.
    pub fn contains_vertex_of_quad(&self, other: &Quad) -> bool {
        other.corners.iter().any(|c| self.contains_point(*c))
    }

    /// Point on the boundary of this quad closest to `point`.
    pub fn point_on_edge_closest_to_point(&self, point: PointD) -> PointD {
        let mut best = self.corners[0];
        let mut best_distance = f64::INFINITY;
        for (a, b) in self.edges() {
            let candidate = point_on_edge_closest_to_point(a, b, point);
            let d = candidate.sq_distance(point);
            if d < best_distance {
                best = candidate;
                best_distance = d;
            }
        }
        best
    }

    /// Pair `(p, q)` with `p` on the boundary of this quad and `q` on the
    /// boundary of `other`, at minimum distance. If the boundaries cross,
    /// both points are the same intersection point.
    pub fn nearest_points(&self, other: &Quad) -> (PointD, PointD) {
        if self.is_null() || other.is_null() {
            return (PointD::NULL, PointD::NULL);
        }
        nearest_points_on_polylines(&self.closed_polyline(), &other.closed_polyline())
            .unwrap_or((PointD::NULL, PointD::NULL))
    }

    fn closed_polyline(&self) -> [PointD; NUM_QUAD_CORNERS + 1] {
        let v = &self.corners;
        [v[0], v[1], v[2], v[3], v[0]]
    }
}

impl Default for Quad {
    fn default() -> Self {
        Self::null()
    }
}

impl From<RectD> for Quad {
    fn from(rect: RectD) -> Self {
        Self::from_rect(rect)
    }
}

impl PartialEq for Quad {
    fn eq(&self, other: &Self) -> bool {
        self.corners == other.corners
    }
}

impl Eq for Quad {}

impl Hash for Quad {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in &self.corners {
            hash_f64(c.x, state);
            hash_f64(c.y, state);
        }
    }
}

impl fmt::Debug for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quad")
            .field("corners", &self.corners)
            .field("type", &self.quad_type)
            .finish()
    }
}

/// `{{x0, y0}, {x1, y1}, {x2, y2}, {x3, y3}}`.
impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, c) in self.corners.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{{{}, {}}}", c.x, c.y)?;
        }
        write!(f, "}}")
    }
}

// ============================================================================
// Tests
// ============================================================================
