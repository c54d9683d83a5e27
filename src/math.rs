//! Geometric math utilities.
//!
//! Cross products, segment projections and intersections, polyline
//! nearest points, and convex hulls. Shared by [`crate::quad`] and the
//! geometry providers.

use crate::basics::PointD;

// ============================================================================
// Constants
// ============================================================================

/// Coinciding points maximal distance (epsilon).
pub const VERTEX_DIST_EPSILON: f64 = 1e-14;

/// Epsilon for intersection calculations.
pub const INTERSECTION_EPSILON: f64 = 1.0e-30;

/// Relative tolerance for collinearity tests. Scaled by the squared extent
/// of the points under test.
pub const COLLINEARITY_EPSILON: f64 = 1e-12;

// ============================================================================
// Cross product and orientation
// ============================================================================

/// Cross product of vectors (p1 - p0) and (p2 - p0).
///
/// Positive when `p2` lies clockwise of the ray `p0 → p1` (+y down).
#[inline]
pub fn cross_product(p0: PointD, p1: PointD, p2: PointD) -> f64 {
    (p1 - p0).cross(p2 - p0)
}

/// Returns `true` if all `points` lie on a single line. Fewer than three
/// points are trivially collinear.
pub fn points_are_collinear(points: &[PointD]) -> bool {
    if points.len() < 3 {
        return true;
    }
    let origin = points[0];
    let Some(&far) = points
        .iter()
        .max_by(|a, b| origin.sq_distance(**a).total_cmp(&origin.sq_distance(**b)))
    else {
        return true;
    };
    let extent = origin.sq_distance(far);
    if extent <= VERTEX_DIST_EPSILON * VERTEX_DIST_EPSILON {
        return true;
    }
    let tolerance = COLLINEARITY_EPSILON * extent;
    points
        .iter()
        .all(|p| cross_product(origin, far, *p).abs() <= tolerance)
}

// ============================================================================
// Segment projection
// ============================================================================

/// Parameter `u` of the projection of `p` onto the line `p0 → p1`.
/// Returns 0 if the segment is degenerate.
#[inline]
pub fn calc_segment_point_u(p0: PointD, p1: PointD, p: PointD) -> f64 {
    let d = p1 - p0;
    let len_sq = d.dot(d);
    if len_sq == 0.0 {
        return 0.0;
    }
    (p - p0).dot(d) / len_sq
}

/// Point on the segment `p0 → p1` closest to `p`.
#[inline]
pub fn point_on_edge_closest_to_point(p0: PointD, p1: PointD, p: PointD) -> PointD {
    let u = calc_segment_point_u(p0, p1, p);
    if u <= 0.0 {
        p0
    } else if u >= 1.0 {
        p1
    } else {
        p0.lerp(p1, u)
    }
}

// ============================================================================
// Intersection
// ============================================================================

/// Intersection point of the infinite lines `a → b` and `c → d`.
/// Returns `None` if the lines are parallel.
#[inline]
pub fn calc_intersection(a: PointD, b: PointD, c: PointD, d: PointD) -> Option<PointD> {
    let num = (a.y - c.y) * (d.x - c.x) - (a.x - c.x) * (d.y - c.y);
    let den = (b.x - a.x) * (d.y - c.y) - (b.y - a.y) * (d.x - c.x);
    if den.abs() < INTERSECTION_EPSILON {
        return None;
    }
    let r = num / den;
    Some(a.lerp(b, r))
}

/// Quick check whether the segments `p0 → p1` and `q0 → q1` cross each
/// other at a single interior point (touching endpoints excluded).
#[inline]
pub fn intersection_exists(p0: PointD, p1: PointD, q0: PointD, q1: PointD) -> bool {
    let d1 = cross_product(p0, p1, q0);
    let d2 = cross_product(p0, p1, q1);
    let d3 = cross_product(q0, q1, p0);
    let d4 = cross_product(q0, q1, p1);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

/// Whether `p` lies on the segment `p0 → p1`, assuming it is collinear.
#[inline]
fn on_segment(p0: PointD, p1: PointD, p: PointD) -> bool {
    p.x >= p0.x.min(p1.x) && p.x <= p0.x.max(p1.x) && p.y >= p0.y.min(p1.y) && p.y <= p0.y.max(p1.y)
}

/// Whether the segments `p0 → p1` and `q0 → q1` share at least one point,
/// endpoints and collinear overlaps included.
pub fn edges_intersect(p0: PointD, p1: PointD, q0: PointD, q1: PointD) -> bool {
    let d1 = cross_product(q0, q1, p0);
    let d2 = cross_product(q0, q1, p1);
    let d3 = cross_product(p0, p1, q0);
    let d4 = cross_product(p0, p1, q1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(q0, q1, p0))
        || (d2 == 0.0 && on_segment(q0, q1, p1))
        || (d3 == 0.0 && on_segment(p0, p1, q0))
        || (d4 == 0.0 && on_segment(p0, p1, q1))
}

/// Intersection point of the segments `p0 → p1` and `q0 → q1`, if any.
/// Collinear overlapping segments yield one of the shared endpoints.
pub fn intersection_point_of_edges(
    p0: PointD,
    p1: PointD,
    q0: PointD,
    q1: PointD,
) -> Option<PointD> {
    if !edges_intersect(p0, p1, q0, q1) {
        return None;
    }
    if let Some(p) = calc_intersection(p0, p1, q0, q1) {
        return Some(p);
    }
    // Parallel and touching: pick a shared endpoint.
    [p0, p1]
        .into_iter()
        .find(|p| on_segment(q0, q1, *p))
        .or_else(|| [q0, q1].into_iter().find(|q| on_segment(p0, p1, *q)))
}

// ============================================================================
// Nearest points
// ============================================================================

/// Pair of points, one on each segment, with minimum distance. If the
/// segments intersect, the intersection point is returned twice.
pub fn nearest_points_on_edges(
    p0: PointD,
    p1: PointD,
    q0: PointD,
    q1: PointD,
) -> (PointD, PointD) {
    if let Some(x) = intersection_point_of_edges(p0, p1, q0, q1) {
        return (x, x);
    }

    // Without an intersection, one of the four endpoints is part of the
    // optimal pair.
    let candidates = [
        (p0, point_on_edge_closest_to_point(q0, q1, p0)),
        (p1, point_on_edge_closest_to_point(q0, q1, p1)),
        (point_on_edge_closest_to_point(p0, p1, q0), q0),
        (point_on_edge_closest_to_point(p0, p1, q1), q1),
    ];
    let mut best = candidates[0];
    for c in &candidates[1..] {
        if c.0.sq_distance(c.1) < best.0.sq_distance(best.1) {
            best = *c;
        }
    }
    best
}

/// Pair of points, one on each polyline, with minimum distance. Polylines
/// with fewer than two points are treated as single points.
pub fn nearest_points_on_polylines(a: &[PointD], b: &[PointD]) -> Option<(PointD, PointD)> {
    let edges_a = polyline_edges(a);
    let edges_b = polyline_edges(b);

    let mut best: Option<(PointD, PointD)> = None;
    for (p0, p1) in &edges_a {
        for (q0, q1) in &edges_b {
            let pair = nearest_points_on_edges(*p0, *p1, *q0, *q1);
            let d = pair.0.sq_distance(pair.1);
            match best {
                Some(b) if b.0.sq_distance(b.1) <= d => {}
                _ => best = Some(pair),
            }
            if d == 0.0 {
                return best;
            }
        }
    }
    best
}

fn polyline_edges(points: &[PointD]) -> Vec<(PointD, PointD)> {
    match points.len() {
        0 => Vec::new(),
        1 => vec![(points[0], points[0])],
        _ => points.windows(2).map(|w| (w[0], w[1])).collect(),
    }
}

// ============================================================================
// Areas and hulls
// ============================================================================

/// Shoelace sum `Σ (x_i * y_{i+1} - x_{i+1} * y_i)` of a closed polygon,
/// i.e. twice its signed area. Positive for clockwise polygons (+y down).
pub fn shoelace_sum(vertices: &[PointD]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| vertices[i].cross(vertices[(i + 1) % n]))
        .sum()
}

/// Convex hull of `points` (Andrew's monotone chain), clockwise (+y down),
/// without collinear points. Duplicates are collapsed.
pub fn convex_hull(points: &[PointD]) -> Vec<PointD> {
    let mut pts: Vec<PointD> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<PointD> = Vec::with_capacity(pts.len() * 2);
    // Lower chain, then upper chain.
    for pass in 0..2 {
        let start = hull.len();
        let iter: Box<dyn Iterator<Item = &PointD>> = if pass == 0 {
            Box::new(pts.iter())
        } else {
            Box::new(pts.iter().rev())
        };
        for p in iter {
            while hull.len() >= start + 2
                && cross_product(hull[hull.len() - 2], hull[hull.len() - 1], *p) <= 0.0
            {
                hull.pop();
            }
            hull.push(*p);
        }
        hull.pop();
    }

    if shoelace_sum(&hull) < 0.0 {
        hull.reverse();
    }
    hull
}

// ============================================================================
// Tests
// ============================================================================
