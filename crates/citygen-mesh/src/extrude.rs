//! Vertical prism extrusion of a ground polygon with optional holes.

use citygen_core::{CityError, Result, Tolerance};
use citygen_geom::Polygon;
use citygen_math::to_3d;

use crate::mesh::Mesh;
use crate::triangulate::triangulate;

/// Lift a planar polygon (with holes) into a closed solid of the given
/// thickness: side walls per boundary ring, a downward-facing bottom cap at
/// elevation 0 and an upward-facing top cap at `thickness`.
///
/// Extrusion is along the fixed up axis only. Input winding is normalized
/// internally (border counter-clockwise, holes clockwise), so callers may
/// pass rings in either orientation. Triangulation vertices are merged back
/// into a shared buffer before per-vertex normals are computed.
pub fn thicken_polygon(border: &Polygon, thickness: f64, holes: &[Polygon]) -> Result<Mesh> {
    if thickness <= 0.0 {
        return Err(CityError::invalid(format!(
            "extrusion thickness must be positive, got {thickness}"
        )));
    }
    let outer = border.oriented_ccw();
    let holes: Vec<Polygon> = holes
        .iter()
        .map(|h| if h.is_ccw() { h.reversed() } else { h.clone() })
        .collect();

    let mut mesh = Mesh::new();
    ring_walls(&mut mesh, &outer, thickness);
    for hole in &holes {
        ring_walls(&mut mesh, hole, thickness);
    }

    let cap = triangulate(&outer, &holes)?;
    // A lifted counter-clockwise ground triangle faces down, so the bottom
    // cap keeps the 2D orientation and the top cap reverses it.
    let base = mesh.positions.len() as u32;
    mesh.positions
        .extend(cap.positions.iter().map(|&p| to_3d(p, 0.0)));
    mesh.triangles
        .extend(cap.triangles.iter().map(|t| t.map(|i| base + i)));
    let top = mesh.positions.len() as u32;
    mesh.positions
        .extend(cap.positions.iter().map(|&p| to_3d(p, thickness)));
    mesh.triangles
        .extend(cap.triangles.iter().map(|&[a, b, c]| [top + c, top + b, top + a]));

    mesh.merge_duplicate_positions(Tolerance::default_precision().linear);
    mesh.compute_normals();
    Ok(mesh)
}

/// One outward-facing wall quad per ring edge, from elevation 0 up to
/// `thickness`. The same emission works for counter-clockwise borders and
/// clockwise holes: a hole's walls face into its cavity.
fn ring_walls(mesh: &mut Mesh, ring: &Polygon, thickness: f64) {
    for (a, b) in ring.edges() {
        mesh.push_quad([
            to_3d(a, 0.0),
            to_3d(a, thickness),
            to_3d(b, thickness),
            to_3d(b, 0.0),
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citygen_math::{to_2d, Vector3};
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

    /// Face normals of every quad and triangle, paired with face centroids.
    fn face_normals(mesh: &Mesh) -> Vec<(Vector3, Vector3)> {
        let mut out = Vec::new();
        for t in &mesh.triangles {
            let [a, b, c] = t.map(|i| mesh.positions[i as usize]);
            out.push(((b - a).cross(c - a), (a + b + c) / 3.0));
        }
        for q in &mesh.quads {
            let [a, b, c, d] = q.map(|i| mesh.positions[i as usize]);
            out.push(((b - a).cross(c - a), (a + b + c + d) / 4.0));
        }
        out
    }

    #[test]
    fn test_rejects_bad_thickness() {
        assert!(thicken_polygon(&square(2.0), 0.0, &[]).is_err());
        assert!(thicken_polygon(&square(2.0), -1.0, &[]).is_err());
    }

    #[test]
    fn test_wall_quad_count() {
        let hex = Polygon::regular(6, 2.0, 0.0).unwrap();
        let solid = thicken_polygon(&hex, 3.0, &[]).unwrap();
        assert_eq!(solid.quad_count(), 6);
        // Caps: 2D triangulation of a hexagon has 4 triangles, twice.
        assert_eq!(solid.triangle_count(), 8);
    }

    #[test]
    fn test_walls_per_ring_with_hole() {
        let solid = thicken_polygon(&square(4.0), 1.0, &[square(2.0).reversed()]).unwrap();
        assert_eq!(solid.quad_count(), 8);
    }

    #[test]
    fn test_outward_winding() {
        let solid = thicken_polygon(&square(2.0), 2.0, &[]).unwrap();
        let center = Vector3::new(0.0, 1.0, 0.0);
        for (normal, centroid) in face_normals(&solid) {
            let outward = centroid - center;
            assert!(
                normal.dot(outward) > 0.0,
                "inward face at {centroid:?} with normal {normal:?}"
            );
        }
    }

    #[test]
    fn test_hole_walls_face_cavity() {
        let solid = thicken_polygon(&square(6.0), 1.0, &[square(2.0).reversed()]).unwrap();
        for (normal, centroid) in face_normals(&solid) {
            let ground = to_2d(centroid);
            // Inner-ring walls: centroid at distance 1 from the axis.
            if normal.y.abs() < 1e-9 && ground.length() < 1.5 {
                // Outward for the solid means toward the hole axis.
                let inward = Vector3::new(-ground.x, 0.0, -ground.y);
                assert!(normal.dot(inward) > 0.0);
            }
        }
    }

    #[test]
    fn test_vertical_extent() {
        use approx::assert_relative_eq;
        let solid = thicken_polygon(&square(2.0), 2.5, &[]).unwrap();
        let bb = solid.bounding_box().unwrap();
        assert_relative_eq!(bb.min.y, 0.0);
        assert_relative_eq!(bb.max.y, 2.5);
    }

    #[test]
    fn test_cw_input_is_normalized() {
        let solid = thicken_polygon(&square(2.0).reversed(), 1.0, &[]).unwrap();
        assert_eq!(solid.quad_count(), 4);
        assert_eq!(solid.triangle_count(), 4);
    }
}
