//! The four roof constructions.
//!
//! Gabled and hipped roofs build on the widened main-points border, whose
//! vertex `i` pairs with vertex `2n-1-i` across centerline point `i`; ridge
//! points sit on the midpoints of those pairs, `tan(angle) * width/2` above
//! the eave line. All faces are wound outward under the y-up ground lift.

use std::f64::consts::FRAC_PI_2;

use citygen_core::{CityError, Result, Validate};
use citygen_geom::{widen_polyline_border, Polygon};
use citygen_math::{to_3d, Point2, Point3, Vector3};
use citygen_mesh::{triangulate, Mesh};

use crate::params::{check_roof_angle, RafterTrim};

/// Continuous gable roof along a main-points centerline, with triangular
/// gable ends and a flat underside strip closing the eave span. The roof
/// base sits at `base_height`.
pub fn cross_gabled(
    main_points: &[Point2],
    width: f64,
    angle: f64,
    base_height: f64,
) -> Result<Mesh> {
    check_roof_angle(angle)?;
    let border = widen_polyline_border(main_points, width)?;
    let ring = border.points();
    let n2 = ring.len();
    let center_height = angle.tan() * width / 2.0;
    let lift = Vector3::new(0.0, center_height, 0.0);

    let mut mesh = Mesh::new();
    mesh.positions = ring.iter().map(|&p| to_3d(p, base_height)).collect();
    mesh.positions
        .push((mesh.positions[0] + mesh.positions[n2 - 1]) / 2.0 + lift);

    // i walks one eave side forward, j the other backward; each step closes
    // one centerline segment with an underside quad and two slope quads up
    // to the next ridge point.
    let (mut i, mut j) = (0u32, (n2 - 1) as u32);
    while i < j - 2 {
        let prev_ridge = (mesh.positions.len() - 1) as u32;
        let next_ridge_pos =
            (mesh.positions[(i + 1) as usize] + mesh.positions[(j - 1) as usize]) / 2.0 + lift;
        mesh.positions.push(next_ridge_pos);
        let next_ridge = prev_ridge + 1;

        mesh.quads.push([i, i + 1, j - 1, j]);
        mesh.quads.push([next_ridge, prev_ridge, j, j - 1]);
        mesh.quads.push([prev_ridge, next_ridge, i + 1, i]);
        i += 1;
        j -= 1;
    }

    let first_ridge = n2 as u32;
    let last_ridge = (mesh.positions.len() - 1) as u32;
    let half = (n2 / 2) as u32;
    mesh.triangles.push([n2 as u32 - 1, first_ridge, 0]);
    mesh.triangles.push([half - 1, last_ridge, half]);

    mesh.compute_normals();
    Ok(mesh)
}

/// Gable roof with both end ridge points pulled inward along the ridge by
/// `hip_depth`, converting the triangular gable ends into hipped ends.
///
/// A depth reaching past the end centerline segment (lengthened ends
/// included) silently produces degenerate geometry; keeping it shorter is
/// the caller's precondition.
pub fn cross_hipped(
    main_points: &[Point2],
    width: f64,
    angle: f64,
    hip_depth: f64,
    base_height: f64,
) -> Result<Mesh> {
    if hip_depth < 0.0 {
        return Err(CityError::invalid(format!(
            "hip depth must be non-negative, got {hip_depth}"
        )));
    }
    let mut mesh = cross_gabled(main_points, width, angle, base_height)?;
    let first_ridge = 2 * main_points.len();
    let last_ridge = mesh.positions.len() - 1;

    let dir = (mesh.positions[first_ridge + 1] - mesh.positions[first_ridge]).normalize();
    mesh.positions[first_ridge] += dir * hip_depth;
    let dir = (mesh.positions[last_ridge] - mesh.positions[last_ridge - 1]).normalize();
    mesh.positions[last_ridge] -= dir * hip_depth;

    mesh.compute_normals();
    Ok(mesh)
}

/// Pyramid roof: the floor border as a downward-facing base, one apex above
/// the border's centroid, and a triangle fan from every border edge to the
/// apex.
pub fn pyramid(border: &Polygon, apex_height: f64, base_height: f64) -> Result<Mesh> {
    if apex_height <= 0.0 {
        return Err(CityError::invalid(format!(
            "pyramid apex height must be positive, got {apex_height}"
        )));
    }
    let border = border.oriented_ccw();
    let cap = triangulate(&border, &[])?;

    let mut mesh = Mesh::new();
    mesh.positions = cap
        .positions
        .iter()
        .map(|&p| to_3d(p, base_height))
        .collect();
    mesh.triangles = cap.triangles.clone();

    let apex = (mesh.positions.len()) as u32;
    mesh.positions
        .push(to_3d(border.centroid(), base_height + apex_height));
    for (a, b) in border.edges() {
        let base = mesh.positions.len() as u32;
        mesh.positions.push(to_3d(a, base_height));
        mesh.positions.push(to_3d(b, base_height));
        mesh.triangles.push([base + 1, base, apex]);
    }

    mesh.merge_duplicate_positions(citygen_core::Tolerance::default_precision().linear);
    mesh.compute_normals();
    Ok(mesh)
}

/// Thickened-rafter trim for a gable roof: the visible roof slab.
///
/// Each main point contributes a six-vertex station (left eave, right eave,
/// ridge, and their thickness offsets); consecutive stations are connected
/// by underside, topside, and eave-soffit quads, with the slab cross-section
/// faces emitted only at the two physical ends. The two derived lengths come
/// from the law of sines on the right triangle the thickness forms against
/// the slope: `thickness / sin(pi/2 - angle)` vertically and
/// `thickness / sin(angle)` horizontally.
pub fn cross_gabled_rafters(
    main_points: &[Point2],
    width: f64,
    angle: f64,
    trim: &RafterTrim,
    base_height: f64,
) -> Result<Mesh> {
    check_roof_angle(angle)?;
    trim.validate()?;
    let border = widen_polyline_border(main_points, width)?;
    let ring = border.points();
    let n2 = ring.len();
    let n = n2 / 2;
    let center_height = angle.tan() * width / 2.0;
    let thick_height = trim.thickness / (FRAC_PI_2 - angle).sin();
    let thick_width = trim.thickness / angle.sin();

    let mut pos: Vec<Point3> = Vec::with_capacity(6 * n);
    for k in 0..n {
        let right = to_3d(ring[k], base_height);
        let left = to_3d(ring[n2 - 1 - k], base_height);
        let ridge = (right + left) / 2.0 + Vector3::new(0.0, center_height, 0.0);
        let to_right = (right - left).normalize();
        pos.push(right);
        pos.push(left);
        pos.push(ridge);
        pos.push(right + to_right * thick_width);
        pos.push(left - to_right * thick_width);
        pos.push(ridge + Vector3::new(0.0, thick_height, 0.0));
    }

    let mut quads: Vec<[u32; 4]> = Vec::new();
    for k in 0..n - 1 {
        let b = (6 * k) as u32;
        // Underside of both slopes.
        quads.push([b + 6, b + 8, b + 2, b]);
        quads.push([b + 7, b + 8, b + 2, b + 1]);
        // Topside.
        quads.push([b + 5, b + 11, b + 9, b + 3]);
        quads.push([b + 10, b + 11, b + 5, b + 4]);
        // Flat eave soffits.
        quads.push([b + 7, b + 10, b + 4, b + 1]);
        quads.push([b + 3, b + 9, b + 6, b]);
        // Slab cross-sections, visible only at the physical ends.
        if k == 0 {
            quads.push([b + 4, b + 5, b + 2, b + 1]);
            quads.push([b + 2, b + 5, b + 3, b]);
        }
        if k == n - 2 {
            quads.push([b + 9, b + 11, b + 8, b + 6]);
            quads.push([b + 8, b + 11, b + 10, b + 7]);
        }
    }

    if trim.rake_overhang > 0.0 {
        let dir = (pos[6] - pos[0]).normalize();
        for p in &mut pos[0..6] {
            *p -= dir * trim.rake_overhang;
        }
        let len = pos.len();
        let dir = (pos[len - 1] - pos[len - 7]).normalize();
        for p in &mut pos[len - 6..] {
            *p += dir * trim.rake_overhang;
        }
    }
    if trim.roof_overhang > 0.0 {
        // Slide the eave pairs down the slope so the slab overshoots the wall.
        let drop = trim.roof_overhang / (FRAC_PI_2 - angle).sin();
        for k in 0..n {
            let b = 6 * k;
            let to_top = (pos[b + 2] - pos[b]).normalize();
            pos[b] -= to_top * drop;
            pos[b + 3] -= to_top * drop;
            let mirrored = Vector3::new(-to_top.x, to_top.y, -to_top.z);
            pos[b + 1] -= mirrored * drop;
            pos[b + 4] -= mirrored * drop;
        }
    }

    let mut mesh = Mesh {
        positions: pos,
        quads,
        ..Default::default()
    };
    mesh.compute_normals();
    Ok(mesh)
}
