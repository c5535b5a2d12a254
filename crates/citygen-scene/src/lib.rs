//! Scene hand-off records.
//!
//! The generator never serializes meshes; it hands the embedding renderer a
//! flat list of [`Instance`] records. Meshes are shared behind `Arc` so a
//! window prototype placed thousands of times stays a single buffer.

use std::sync::Arc;

use citygen_math::{Aabb3, Transform};
use citygen_mesh::Mesh;

/// A placed mesh: shared geometry, a rigid transform, and a name the
/// embedder can key materials and picking on.
#[derive(Debug, Clone)]
pub struct Instance {
    pub name: String,
    pub mesh: Arc<Mesh>,
    pub transform: Transform,
}

impl Instance {
    pub fn new(name: impl Into<String>, mesh: Arc<Mesh>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform,
        }
    }

    /// World-space bounding box, `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<Aabb3> {
        let points: Vec<_> = self
            .mesh
            .positions
            .iter()
            .map(|&p| self.transform.transform_point(p))
            .collect();
        Aabb3::from_points(&points)
    }
}

/// An ordered collection of placed instances.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub instances: Vec<Instance>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, instance: Instance) {
        self.instances.push(instance);
    }

    pub fn extend(&mut self, instances: impl IntoIterator<Item = Instance>) {
        self.instances.extend(instances);
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Total triangle count, quads counted as two.
    pub fn triangle_count(&self) -> usize {
        self.instances
            .iter()
            .map(|i| i.mesh.triangle_count() + 2 * i.mesh.quad_count())
            .sum()
    }

    /// Bounding box over all instances, `None` for an empty scene.
    pub fn bounding_box(&self) -> Option<Aabb3> {
        self.instances
            .iter()
            .filter_map(Instance::bounding_box)
            .reduce(|a, b| a.merge(&b))
    }
}
