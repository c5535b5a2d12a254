//! Polygon offsetting: shift every edge along its normal and re-intersect
//! neighbours at the new miter corner.
//!
//! Inward offsets can pinch a footprint apart, so [`offset_polygon`] returns
//! a set of rings: the raw mitered ring is split at self-intersections and
//! sub-rings that come out degenerate or wound against the input are dropped.
//! [`expand_polygon`] is the outward-only form, where no split can occur and
//! exactly one ring comes back.

use citygen_core::{CityError, Result, Tolerance};
use citygen_math::{Point2, Vector2};

use crate::polygon::{signed_area, Polygon};

/// Offset a closed ring by `delta`: outward for positive values, inward for
/// negative ones. Rings are returned in descending area order; callers that
/// assume the offset did not split take the first.
///
/// Insetting past the footprint's inradius is not detected; staying within it
/// is a caller precondition, like hip depth on hipped roofs.
pub fn offset_polygon(polygon: &Polygon, delta: f64) -> Vec<Polygon> {
    let tol = Tolerance::default_precision();
    if tol.is_zero(delta) {
        return vec![polygon.clone()];
    }

    let winding = polygon.signed_area().signum();
    let raw = mitered_ring(polygon.points(), delta, winding, tol);

    let mut rings = Vec::new();
    collect_simple_rings(raw, winding, tol, &mut rings);
    rings.sort_by(|a, b| {
        signed_area(b)
            .abs()
            .partial_cmp(&signed_area(a).abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rings
        .into_iter()
        .filter_map(|r| Polygon::new(r).ok())
        .collect()
}

/// Outward-only offset. Growth cannot split a simple ring, so the result is
/// a single polygon.
pub fn expand_polygon(polygon: &Polygon, delta: f64) -> Result<Polygon> {
    if delta < 0.0 {
        return Err(CityError::invalid(format!(
            "expand_polygon grows outward only, got delta {delta}; use offset_polygon for insets"
        )));
    }
    let tol = Tolerance::default_precision();
    if tol.is_zero(delta) {
        return Ok(polygon.clone());
    }
    let winding = polygon.signed_area().signum();
    let ring = clean_ring(&mitered_ring(polygon.points(), delta, winding, tol), tol);
    Polygon::new(ring)
}

/// Shift every edge by `delta` along the ring's outward normal and miter
/// adjacent shifted edges back together. Parallel neighbours fall back to
/// shifting the shared corner directly.
fn mitered_ring(points: &[Point2], delta: f64, winding: f64, tol: Tolerance) -> Vec<Point2> {
    let n = points.len();
    let mut shifted: Vec<(Point2, Point2)> = Vec::with_capacity(n);
    for i in 0..n {
        let j = (i + 1) % n;
        let dir = (points[j] - points[i]).normalize();
        let out = outward_normal(dir, winding);
        shifted.push((points[i] + out * delta, points[j] + out * delta));
    }

    let mut ring = Vec::with_capacity(n);
    for i in 0..n {
        let prev = (i + n - 1) % n;
        ring.push(miter_corner(
            &shifted[prev],
            &shifted[i],
            points[i],
            delta,
            winding,
            tol,
        ));
    }
    ring
}

fn outward_normal(dir: Vector2, winding: f64) -> Vector2 {
    if winding >= 0.0 {
        Vector2::new(dir.y, -dir.x)
    } else {
        Vector2::new(-dir.y, dir.x)
    }
}

/// Intersection of two shifted edge lines; for parallel edges the shared
/// corner is shifted along the previous edge's normal instead.
fn miter_corner(
    seg_prev: &(Point2, Point2),
    seg_next: &(Point2, Point2),
    original: Point2,
    delta: f64,
    winding: f64,
    tol: Tolerance,
) -> Point2 {
    let d_prev = seg_prev.1 - seg_prev.0;
    let d_next = seg_next.1 - seg_next.0;
    match line_intersection(seg_prev.0, d_prev, seg_next.0, d_next, tol) {
        Some((t, _)) => seg_prev.0 + d_prev * t,
        None => original + outward_normal(d_prev.normalize(), winding) * delta,
    }
}

/// Parametric intersection of lines `p1 + t*d1` and `p2 + u*d2`.
fn line_intersection(
    p1: Point2,
    d1: Vector2,
    p2: Point2,
    d2: Vector2,
    tol: Tolerance,
) -> Option<(f64, f64)> {
    let cross = d1.perp_dot(d2);
    if cross.abs() < tol.linear {
        return None;
    }
    let d = p2 - p1;
    Some((d.perp_dot(d2) / cross, d.perp_dot(d1) / cross))
}

/// Recursively split at self-intersections; keep leaf rings that stay
/// non-degenerate and wound like the input.
fn collect_simple_rings(ring: Vec<Point2>, winding: f64, tol: Tolerance, out: &mut Vec<Vec<Point2>>) {
    let pts = clean_ring(&ring, tol);
    if pts.len() < 3 {
        return;
    }
    match first_self_intersection(&pts, tol) {
        None => {
            let area = signed_area(&pts);
            if area * winding > 0.0 && !tol.degenerate_area(area) {
                out.push(pts);
            }
        }
        Some((i, j, x)) => {
            let (a, b) = split_ring(&pts, i, j, x);
            collect_simple_rings(a, winding, tol, out);
            collect_simple_rings(b, winding, tol, out);
        }
    }
}

/// Drop consecutive near-duplicates (wrap included) and collinear vertices.
fn clean_ring(points: &[Point2], tol: Tolerance) -> Vec<Point2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let tol_sq = tol.linear * tol.linear;
    let mut deduped: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        if let Some(&last) = deduped.last() {
            if p.distance_squared(last) < tol_sq {
                continue;
            }
        }
        deduped.push(p);
    }
    while deduped.len() > 1 && deduped[0].distance_squared(deduped[deduped.len() - 1]) < tol_sq {
        deduped.pop();
    }
    if deduped.len() < 3 {
        return deduped;
    }

    let n = deduped.len();
    let mut cleaned = Vec::with_capacity(n);
    for i in 0..n {
        let prev = deduped[(i + n - 1) % n];
        let next = deduped[(i + 1) % n];
        let cross = (deduped[i] - prev).perp_dot(next - deduped[i]);
        if cross.abs() >= tol.linear {
            cleaned.push(deduped[i]);
        }
    }
    if cleaned.len() < 3 {
        return deduped;
    }
    cleaned
}

/// First genuine crossing between non-adjacent edges, scan order by edge
/// index. Touches where both parameters sit at segment ends are revisits of
/// a shared vertex, not crossings, and are skipped.
fn first_self_intersection(points: &[Point2], tol: Tolerance) -> Option<(usize, usize, Point2)> {
    let n = points.len();
    if n < 4 {
        return None;
    }
    let end_eps = tol.linear * 100.0;
    for i in 0..n {
        for j in (i + 2)..n {
            if i.abs_diff(j) == n - 1 {
                continue;
            }
            let (a0, a1) = (points[i], points[(i + 1) % n]);
            let (b0, b1) = (points[j], points[(j + 1) % n]);
            if let Some((p, t, u)) = segment_intersection(a0, a1, b0, b1, tol) {
                let t_at_end = t < end_eps || t > 1.0 - end_eps;
                let u_at_end = u < end_eps || u > 1.0 - end_eps;
                if t_at_end && u_at_end {
                    continue;
                }
                return Some((i, j, p));
            }
        }
    }
    None
}

/// Bounded segment-segment intersection; endpoints included within tolerance.
fn segment_intersection(
    a0: Point2,
    a1: Point2,
    b0: Point2,
    b1: Point2,
    tol: Tolerance,
) -> Option<(Point2, f64, f64)> {
    let (t, u) = line_intersection(a0, a1 - a0, b0, b1 - b0, tol)?;
    let eps = tol.linear;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let tc = t.clamp(0.0, 1.0);
        Some((a0 + (a1 - a0) * tc, tc, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Split a ring crossed by edges `i` and `j` (`i < j`) into the two loops
/// meeting at the crossing point.
fn split_ring(
    points: &[Point2],
    seg_i: usize,
    seg_j: usize,
    crossing: Point2,
) -> (Vec<Point2>, Vec<Point2>) {
    let n = points.len();

    let mut a = Vec::with_capacity(seg_j - seg_i + 1);
    a.push(crossing);
    a.extend_from_slice(&points[(seg_i + 1)..=seg_j]);

    let mut b = Vec::with_capacity(n - (seg_j - seg_i) + 1);
    b.push(crossing);
    let mut idx = (seg_j + 1) % n;
    loop {
        b.push(points[idx]);
        if idx == seg_i {
            break;
        }
        idx = (idx + 1) % n;
    }

    (a, b)
}
