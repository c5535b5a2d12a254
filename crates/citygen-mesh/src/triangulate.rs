//! Constrained-Delaunay triangulation of a border with optional holes.
//!
//! The backend is `spade`; this module only feeds it rings as constraint
//! edges and filters its faces down to the interior. Output vertices are
//! emitted per-triangle, without global deduplication; callers wanting a
//! shared vertex buffer merge coincident positions afterwards.

use citygen_core::{CityError, Result};
use citygen_geom::Polygon;
use citygen_math::Point2;
use spade::{ConstrainedDelaunayTriangulation, Triangulation as _};

/// A cap triangulation over independent per-triangle vertices: triangle `i`
/// references positions `3i`, `3i+1`, `3i+2`. Triangles keep spade's
/// counter-clockwise orientation on the ground plane.
#[derive(Debug, Clone, Default)]
pub struct CapTriangulation {
    pub positions: Vec<Point2>,
    pub triangles: Vec<[u32; 3]>,
}

impl CapTriangulation {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Triangulate the interior of `border` minus `holes`.
///
/// The border must be counter-clockwise and each hole clockwise; holes must
/// lie strictly inside the border and not touch each other. Interior faces
/// are selected by testing each face centroid against the rings.
pub fn triangulate(border: &Polygon, holes: &[Polygon]) -> Result<CapTriangulation> {
    if !border.is_ccw() {
        return Err(CityError::invalid(
            "triangulation border must be counter-clockwise",
        ));
    }
    for (i, hole) in holes.iter().enumerate() {
        if hole.is_ccw() {
            return Err(CityError::invalid(format!(
                "triangulation hole {i} must be clockwise"
            )));
        }
    }

    let mut cdt: ConstrainedDelaunayTriangulation<spade::Point2<f64>> =
        ConstrainedDelaunayTriangulation::new();
    for ring in std::iter::once(border).chain(holes) {
        let mut handles = Vec::with_capacity(ring.len());
        for p in ring.points() {
            let handle = cdt
                .insert(spade::Point2::new(p.x, p.y))
                .map_err(|e| CityError::invalid(format!("unusable ring vertex: {e}")))?;
            handles.push(handle);
        }
        for i in 0..handles.len() {
            let j = (i + 1) % handles.len();
            if handles[i] != handles[j] && cdt.can_add_constraint(handles[i], handles[j]) {
                cdt.add_constraint(handles[i], handles[j]);
            }
        }
    }

    let mut out = CapTriangulation::default();
    for face in cdt.inner_faces() {
        let [v0, v1, v2] = face.vertices();
        let p0 = Point2::new(v0.position().x, v0.position().y);
        let p1 = Point2::new(v1.position().x, v1.position().y);
        let p2 = Point2::new(v2.position().x, v2.position().y);
        let centroid = (p0 + p1 + p2) / 3.0;
        if !border.contains(centroid) {
            continue;
        }
        if holes.iter().any(|h| h.contains(centroid)) {
            continue;
        }
        let base = out.positions.len() as u32;
        out.positions.extend_from_slice(&[p0, p1, p2]);
        out.triangles.push([base, base + 1, base + 2]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn square(side: f64) -> Polygon {
        let s = side / 2.0;
        Polygon::new(vec![
            dvec2(-s, -s),
            dvec2(s, -s),
            dvec2(s, s),
            dvec2(-s, s),
        ])
        .unwrap()
    }

    fn total_area(cap: &CapTriangulation) -> f64 {
        cap.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = t.map(|i| cap.positions[i as usize]);
                (b - a).perp_dot(c - a) / 2.0
            })
            .sum()
    }

    #[test]
    fn test_square_covers_interior() {
        let cap = triangulate(&square(2.0), &[]).unwrap();
        assert_eq!(cap.triangle_count(), 2);
        assert!((total_area(&cap) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_triangles_are_ccw() {
        let hex = Polygon::regular(6, 3.0, 0.2).unwrap();
        let cap = triangulate(&hex, &[]).unwrap();
        for t in &cap.triangles {
            let [a, b, c] = t.map(|i| cap.positions[i as usize]);
            assert!((b - a).perp_dot(c - a) > 0.0, "clockwise cap triangle");
        }
    }

    #[test]
    fn test_concave_border() {
        // L-shape: the notch must not be covered.
        let l = Polygon::new(vec![
            dvec2(0.0, 0.0),
            dvec2(4.0, 0.0),
            dvec2(4.0, 2.0),
            dvec2(2.0, 2.0),
            dvec2(2.0, 4.0),
            dvec2(0.0, 4.0),
        ])
        .unwrap();
        let cap = triangulate(&l, &[]).unwrap();
        assert!((total_area(&cap) - 12.0).abs() < 1e-9);
        let notch = dvec2(3.0, 3.0);
        for t in &cap.triangles {
            let [a, b, c] = t.map(|i| cap.positions[i as usize]);
            let centroid = (a + b + c) / 3.0;
            assert!((centroid - notch).length() > 0.5, "face inside the notch");
        }
    }

    #[test]
    fn test_hole_is_excluded() {
        let outer = square(4.0);
        let hole = square(2.0).reversed();
        let cap = triangulate(&outer, &[hole]).unwrap();
        assert!((total_area(&cap) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_winding_mismatch_rejected() {
        assert!(triangulate(&square(2.0).reversed(), &[]).is_err());
        assert!(triangulate(&square(4.0), &[square(2.0)]).is_err());
    }
}
