//! Indexed mesh with mixed triangle and quad faces.

use citygen_math::{to_3d, Aabb3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// An indexed mesh: positions plus triangle and quad face lists, with
/// optional per-vertex normals and colors (empty when absent).
///
/// Per-vertex attribute vectors are either empty or exactly as long as
/// `positions`; merging two meshes expects the attribute to be present on
/// both sides or on neither.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub colors: Vec<[f32; 3]>,
    pub triangles: Vec<[u32; 3]>,
    pub quads: Vec<[u32; 4]>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append a quad from four fresh vertices, in the given winding order.
    pub fn push_quad(&mut self, corners: [Point3; 4]) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&corners);
        self.quads.push([base, base + 1, base + 2, base + 3]);
    }

    /// Merge another mesh into this one, offsetting its face indices by the
    /// prior position count.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.colors.extend_from_slice(&other.colors);
        self.triangles
            .extend(other.triangles.iter().map(|t| t.map(|i| i + offset)));
        self.quads
            .extend(other.quads.iter().map(|q| q.map(|i| i + offset)));
    }

    /// A copy displaced by `v`. Normals and face lists are unchanged.
    pub fn translated(&self, v: Vector3) -> Mesh {
        let mut out = self.clone();
        for p in &mut out.positions {
            *p += v;
        }
        out
    }

    /// Assign the same color to every vertex.
    pub fn paint(&mut self, color: [f32; 3]) {
        self.colors.clear();
        self.colors.resize(self.positions.len(), color);
    }

    /// A painted copy.
    pub fn painted(&self, color: [f32; 3]) -> Mesh {
        let mut out = self.clone();
        out.paint(color);
        out
    }

    /// Collapse positions that coincide within `tol`, remapping faces to the
    /// first occurrence. Triangulation emits independent per-triangle
    /// vertices; this pass restores a shared vertex buffer so that normal
    /// accumulation sees adjacency.
    pub fn merge_duplicate_positions(&mut self, tol: f64) {
        use std::collections::HashMap;

        let quantize = |p: &Point3| {
            (
                (p.x / tol).round() as i64,
                (p.y / tol).round() as i64,
                (p.z / tol).round() as i64,
            )
        };

        let mut first: HashMap<(i64, i64, i64), u32> = HashMap::new();
        let mut remap = Vec::with_capacity(self.positions.len());
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut colors = Vec::new();
        for (i, p) in self.positions.iter().enumerate() {
            let key = quantize(p);
            match first.get(&key) {
                Some(&idx) => remap.push(idx),
                None => {
                    let idx = positions.len() as u32;
                    first.insert(key, idx);
                    positions.push(*p);
                    if !self.normals.is_empty() {
                        normals.push(self.normals[i]);
                    }
                    if !self.colors.is_empty() {
                        colors.push(self.colors[i]);
                    }
                    remap.push(idx);
                }
            }
        }

        self.positions = positions;
        self.normals = normals;
        self.colors = colors;
        for t in &mut self.triangles {
            *t = t.map(|i| remap[i as usize]);
        }
        for q in &mut self.quads {
            *q = q.map(|i| remap[i as usize]);
        }
    }

    /// Per-vertex normals from the current face lists: face normals are
    /// accumulated onto their vertices (area-weighted, since the cross
    /// product scales with face area) and normalized.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vector3::ZERO; self.positions.len()];
        let quad_halves = self
            .quads
            .iter()
            .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]]);
        for [i0, i1, i2] in self.triangles.iter().copied().chain(quad_halves) {
            let p0 = self.positions[i0 as usize];
            let p1 = self.positions[i1 as usize];
            let p2 = self.positions[i2 as usize];
            let normal = (p1 - p0).cross(p2 - p0);
            normals[i0 as usize] += normal;
            normals[i1 as usize] += normal;
            normals[i2 as usize] += normal;
        }
        for v in &mut normals {
            let len = v.length();
            if len > 1e-12 {
                *v /= len;
            }
        }
        self.normals = normals;
    }

    pub fn bounding_box(&self) -> Option<Aabb3> {
        Aabb3::from_points(&self.positions)
    }

    /// Extents of the bounding box, zero for an empty mesh.
    pub fn size(&self) -> Vector3 {
        self.bounding_box()
            .map(|bb| bb.extents())
            .unwrap_or(Vector3::ZERO)
    }
}

/// Lift a ground-plane ring into mesh positions at a fixed elevation.
pub fn lift_ring(points: &[citygen_math::Point2], elevation: f64) -> Vec<Point3> {
    points.iter().map(|&p| to_3d(p, elevation)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    fn tri_mesh(origin: Point3) -> Mesh {
        Mesh {
            positions: vec![
                origin,
                origin + dvec3(1.0, 0.0, 0.0),
                origin + dvec3(0.0, 0.0, 1.0),
            ],
            triangles: vec![[0, 1, 2]],
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut a = tri_mesh(dvec3(0.0, 0.0, 0.0));
        let b = tri_mesh(dvec3(5.0, 0.0, 0.0));
        a.merge(&b);
        assert_eq!(a.vertex_count(), 6);
        assert_eq!(a.triangles[0], [0, 1, 2]);
        assert_eq!(a.triangles[1], [3, 4, 5]);
    }

    #[test]
    fn test_merge_into_empty_preserves_faces() {
        let mut a = Mesh::new();
        let b = tri_mesh(dvec3(0.0, 0.0, 0.0));
        a.merge(&b);
        assert_eq!(a.triangles, b.triangles);
    }

    #[test]
    fn test_translated_is_pure() {
        let a = tri_mesh(dvec3(0.0, 0.0, 0.0));
        let moved = a.translated(dvec3(0.0, 3.0, 0.0));
        assert_eq!(a.positions[0], dvec3(0.0, 0.0, 0.0));
        assert_eq!(moved.positions[0], dvec3(0.0, 3.0, 0.0));
        assert_eq!(moved.triangles, a.triangles);
    }

    #[test]
    fn test_merge_duplicate_positions() {
        let mut m = Mesh {
            positions: vec![
                dvec3(0.0, 0.0, 0.0),
                dvec3(1.0, 0.0, 0.0),
                dvec3(0.0, 0.0, 1.0),
                dvec3(1.0, 0.0, 0.0),
                dvec3(2.0, 0.0, 1.0),
                dvec3(0.0, 0.0, 1.0),
            ],
            triangles: vec![[0, 1, 2], [3, 4, 5]],
            ..Default::default()
        };
        m.merge_duplicate_positions(1e-7);
        assert_eq!(m.vertex_count(), 4);
        assert_eq!(m.triangles[0], [0, 1, 2]);
        assert_eq!(m.triangles[1], [1, 3, 2]);
    }

    #[test]
    fn test_compute_normals_quad() {
        let mut m = Mesh::new();
        // Ground quad wound to face up (+y).
        m.push_quad([
            dvec3(0.0, 0.0, 0.0),
            dvec3(0.0, 0.0, 1.0),
            dvec3(1.0, 0.0, 1.0),
            dvec3(1.0, 0.0, 0.0),
        ]);
        m.compute_normals();
        for n in &m.normals {
            assert!((n.y - 1.0).abs() < 1e-10, "expected +y normal, got {n:?}");
        }
    }

    #[test]
    fn test_paint() {
        let mut m = tri_mesh(dvec3(0.0, 0.0, 0.0));
        m.paint([0.5, 0.25, 0.125]);
        assert_eq!(m.colors.len(), 3);
        assert_eq!(m.colors[2], [0.5, 0.25, 0.125]);
    }

    #[test]
    fn test_size() {
        let m = tri_mesh(dvec3(0.0, 0.0, 0.0));
        assert_eq!(m.size(), dvec3(1.0, 0.0, 1.0));
        assert_eq!(Mesh::new().size(), Vector3::ZERO);
    }
}
