//! Mesh primitives.

use citygen_core::{CityError, Result};
use citygen_math::{Point3, Vector3};

use crate::mesh::Mesh;

/// An axis-aligned box centered at the origin, as six outward quads over 24
/// vertices so every face keeps a flat normal. Window prototypes are built
/// from this.
pub fn make_box(size_x: f64, size_y: f64, size_z: f64) -> Result<Mesh> {
    if size_x <= 0.0 || size_y <= 0.0 || size_z <= 0.0 {
        return Err(CityError::invalid(format!(
            "box extents must be positive, got {size_x} x {size_y} x {size_z}"
        )));
    }
    let (x, y, z) = (size_x / 2.0, size_y / 2.0, size_z / 2.0);
    let corner = |sx: f64, sy: f64, sz: f64| Point3::new(sx * x, sy * y, sz * z);

    let faces: [([Point3; 4], Vector3); 6] = [
        (
            [
                corner(1.0, -1.0, -1.0),
                corner(1.0, 1.0, -1.0),
                corner(1.0, 1.0, 1.0),
                corner(1.0, -1.0, 1.0),
            ],
            Vector3::X,
        ),
        (
            [
                corner(-1.0, -1.0, 1.0),
                corner(-1.0, 1.0, 1.0),
                corner(-1.0, 1.0, -1.0),
                corner(-1.0, -1.0, -1.0),
            ],
            Vector3::NEG_X,
        ),
        (
            [
                corner(-1.0, 1.0, -1.0),
                corner(-1.0, 1.0, 1.0),
                corner(1.0, 1.0, 1.0),
                corner(1.0, 1.0, -1.0),
            ],
            Vector3::Y,
        ),
        (
            [
                corner(-1.0, -1.0, -1.0),
                corner(1.0, -1.0, -1.0),
                corner(1.0, -1.0, 1.0),
                corner(-1.0, -1.0, 1.0),
            ],
            Vector3::NEG_Y,
        ),
        (
            [
                corner(-1.0, -1.0, 1.0),
                corner(1.0, -1.0, 1.0),
                corner(1.0, 1.0, 1.0),
                corner(-1.0, 1.0, 1.0),
            ],
            Vector3::Z,
        ),
        (
            [
                corner(1.0, -1.0, -1.0),
                corner(-1.0, -1.0, -1.0),
                corner(-1.0, 1.0, -1.0),
                corner(1.0, 1.0, -1.0),
            ],
            Vector3::NEG_Z,
        ),
    ];

    let mut mesh = Mesh::new();
    for (corners, normal) in faces {
        mesh.push_quad(corners);
        mesh.normals.extend([normal; 4]);
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_counts() {
        let b = make_box(2.0, 1.0, 0.5).unwrap();
        assert_eq!(b.vertex_count(), 24);
        assert_eq!(b.quad_count(), 6);
        assert_eq!(b.normals.len(), 24);
    }

    #[test]
    fn test_box_centered_extents() {
        let b = make_box(1.6, 1.0, 0.1).unwrap();
        let bb = b.bounding_box().unwrap();
        assert!((bb.center()).length() < 1e-12);
        assert!((b.size() - Vector3::new(1.6, 1.0, 0.1)).length() < 1e-12);
    }

    #[test]
    fn test_box_faces_outward() {
        let b = make_box(2.0, 2.0, 2.0).unwrap();
        for q in &b.quads {
            let [p0, p1, p2, _] = q.map(|i| b.positions[i as usize]);
            let winding_normal = (p1 - p0).cross(p2 - p0);
            let stored = b.normals[q[0] as usize];
            assert!(winding_normal.dot(stored) > 0.0, "winding disagrees with normal");
        }
    }

    #[test]
    fn test_box_rejects_flat() {
        assert!(make_box(0.0, 1.0, 1.0).is_err());
        assert!(make_box(1.0, -2.0, 1.0).is_err());
    }
}
