use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box in 3D space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point3]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min = points[0];
        let mut max = points[0];
        for &p in &points[1..] {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Self { min, max })
    }

    pub fn center(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }

    pub fn contains_point(&self, p: Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    #[test]
    fn test_from_points() {
        let pts = vec![dvec3(1.0, 2.0, 3.0), dvec3(-1.0, 5.0, 0.0), dvec3(3.0, -1.0, 2.0)];
        let aabb = Aabb3::from_points(&pts).unwrap();
        assert_eq!(aabb.min, dvec3(-1.0, -1.0, 0.0));
        assert_eq!(aabb.max, dvec3(3.0, 5.0, 3.0));
    }

    #[test]
    fn test_extents_and_center() {
        let aabb = Aabb3::new(dvec3(0.0, 0.0, 0.0), dvec3(4.0, 2.0, 6.0));
        assert_eq!(aabb.extents(), dvec3(4.0, 2.0, 6.0));
        assert_eq!(aabb.center(), dvec3(2.0, 1.0, 3.0));
        assert!(aabb.contains_point(dvec3(1.0, 1.0, 1.0)));
        assert!(!aabb.contains_point(dvec3(5.0, 1.0, 1.0)));
    }

    #[test]
    fn test_merge() {
        let a = Aabb3::new(dvec3(0.0, 0.0, 0.0), dvec3(1.0, 1.0, 1.0));
        let b = Aabb3::new(dvec3(-1.0, 0.5, 0.0), dvec3(0.5, 3.0, 1.0));
        let m = a.merge(&b);
        assert_eq!(m.min, dvec3(-1.0, 0.0, 0.0));
        assert_eq!(m.max, dvec3(1.0, 3.0, 1.0));
    }
}
