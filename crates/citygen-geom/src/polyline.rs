//! Polyline widening and segmented-line generation.
//!
//! Widening turns a centerline into a constant-width ribbon by placing two
//! offset points per source vertex, at ±width/2 along the perpendicular of
//! the local direction bisector. The ribbon is the footprint primitive for
//! elongated buildings: its vertices come back either as a quad strip or as
//! a single closed border walking one side forward and the other backward.

use citygen_core::{CityError, Result};
use citygen_math::{Point2, Vector2};

use crate::polygon::Polygon;

/// Left-hand perpendicular of a direction.
fn perp_left(d: Vector2) -> Vector2 {
    Vector2::new(-d.y, d.x)
}

fn check_polyline(points: &[Point2], width: f64, min_points: usize) -> Result<()> {
    if points.len() < min_points {
        return Err(CityError::invalid(format!(
            "a polyline needs at least {min_points} points, got {}",
            points.len()
        )));
    }
    if width <= 0.0 {
        return Err(CityError::invalid(format!(
            "ribbon width must be positive, got {width}"
        )));
    }
    for i in 0..points.len() - 1 {
        if points[i].distance_squared(points[i + 1]) < 1e-24 {
            return Err(CityError::invalid(format!(
                "coincident consecutive polyline points at index {i}"
            )));
        }
    }
    Ok(())
}

/// Miter offset at `p` between incoming direction `d_in` and outgoing
/// direction `d_out`, scaled so the ribbon keeps constant width through the
/// corner. A 180-degree reversal has no miter; the incoming perpendicular is
/// used as-is.
fn miter_offset(d_in: Vector2, d_out: Vector2, half_width: f64) -> Vector2 {
    let n_in = perp_left(d_in);
    let n_out = perp_left(d_out);
    let m = n_in + n_out;
    let len_sq = m.length_squared();
    if len_sq < 1e-18 {
        return n_in * half_width;
    }
    let m = m / len_sq.sqrt();
    // Constant-width scaling: project the miter back onto an edge normal.
    m * (half_width / m.dot(n_in))
}

/// The two offset sides of a widened polyline, one entry per source point:
/// `(left, right)` with left at +width/2 along the local perpendicular.
///
/// Endpoints reuse their single adjacent direction as both incoming and
/// outgoing, which is the bisector logic applied to a straight-line
/// extrapolation of the polyline. With `lengthen_ends` the first and last
/// source points are first pushed outward along their adjacent segment by
/// width/2, so the ribbon caps square instead of stopping short.
///
/// The result is only simple for polylines whose turns are gentle relative
/// to the width; sharp kinks can self-intersect and are not detected here.
pub fn widen_polyline_sides(
    points: &[Point2],
    width: f64,
    lengthen_ends: bool,
) -> Result<(Vec<Point2>, Vec<Point2>)> {
    check_polyline(points, width, 2)?;
    let half = width / 2.0;

    let mut pts = points.to_vec();
    if lengthen_ends {
        let n = pts.len();
        let d_first = (pts[1] - pts[0]).normalize();
        let d_last = (pts[n - 1] - pts[n - 2]).normalize();
        pts[0] -= d_first * half;
        pts[n - 1] += d_last * half;
    }

    let n = pts.len();
    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);
    for i in 0..n {
        let d_in = if i == 0 {
            (pts[1] - pts[0]).normalize()
        } else {
            (pts[i] - pts[i - 1]).normalize()
        };
        let d_out = if i == n - 1 {
            d_in
        } else {
            (pts[i + 1] - pts[i]).normalize()
        };
        let d_in = if i == 0 { d_out } else { d_in };
        let offset = miter_offset(d_in, d_out, half);
        left.push(pts[i] + offset);
        right.push(pts[i] - offset);
    }
    Ok((left, right))
}

/// Widen a polyline into a quad strip of `points.len() - 1` quads, each
/// wound counter-clockwise on the ground plane.
pub fn widen_polyline(
    points: &[Point2],
    width: f64,
    lengthen_ends: bool,
) -> Result<Vec<[Point2; 4]>> {
    let (left, right) = widen_polyline_sides(points, width, lengthen_ends)?;
    Ok((0..points.len() - 1)
        .map(|i| [right[i], right[i + 1], left[i + 1], left[i]])
        .collect())
}

/// Widen a polyline into a single closed border: the right side walked
/// forward, then the left side walked backward. Ends are always lengthened
/// by width/2, so the border of an L-long straight centerline spans L+width.
///
/// For a centerline of n points the border has 2n vertices, wound
/// counter-clockwise, with vertex `i` and vertex `2n-1-i` forming the two
/// sides of centerline point `i`. Roof builders rely on that pairing.
pub fn widen_polyline_border(points: &[Point2], width: f64) -> Result<Polygon> {
    let (left, right) = widen_polyline_sides(points, width, true)?;
    let mut ring = right;
    ring.extend(left.into_iter().rev());
    Polygon::new(ring)
}

/// Iteratively grow a polyline of `steps` segments from `start`.
///
/// The first segment leaves at `start_angle` verbatim; every later segment
/// first turns by `angle_delta()` and then advances by `length()`. Both
/// generators are sampled once per segment, in advance-order, so callers
/// driving them from a random source get reproducible sequences.
pub fn segmented_line(
    start: Point2,
    steps: usize,
    start_angle: f64,
    mut angle_delta: impl FnMut() -> f64,
    mut length: impl FnMut() -> f64,
) -> Result<Vec<Point2>> {
    if steps == 0 {
        return Err(CityError::invalid("a segmented line needs at least 1 segment"));
    }
    let mut points = Vec::with_capacity(steps + 1);
    points.push(start);
    let mut angle = start_angle;
    for step in 0..steps {
        if step > 0 {
            angle += angle_delta();
        }
        let len = length();
        if len <= 0.0 {
            return Err(CityError::invalid(format!(
                "segment length must be positive, got {len}"
            )));
        }
        let last = points[points.len() - 1];
        points.push(last + Vector2::new(angle.cos(), angle.sin()) * len);
    }
    Ok(points)
}
