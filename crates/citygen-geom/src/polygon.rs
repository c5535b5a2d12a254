//! Closed 2D polygons on the ground plane.

use citygen_core::{CityError, Result};
use citygen_math::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// An ordered ring of ground-plane points, implicitly closed (the last point
/// connects back to the first).
///
/// Invariants, enforced at construction: at least 3 vertices, and no
/// coincident consecutive vertices (the closing edge included). Winding is
/// not normalized here; outer borders are conventionally counter-clockwise
/// and holes clockwise, with [`Polygon::oriented_ccw`] and
/// [`Polygon::reversed`] available to adjust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Point2>,
}

impl Polygon {
    /// Smallest vertex separation accepted by the constructor.
    const MIN_SEPARATION: f64 = 1e-12;

    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if points.len() < 3 {
            return Err(CityError::invalid(format!(
                "a polygon needs at least 3 vertices, got {}",
                points.len()
            )));
        }
        for i in 0..points.len() {
            let j = (i + 1) % points.len();
            if points[i].distance_squared(points[j]) < Self::MIN_SEPARATION * Self::MIN_SEPARATION {
                return Err(CityError::invalid(format!(
                    "coincident consecutive vertices at index {i}"
                )));
            }
        }
        Ok(Self { points })
    }

    /// `sides` points evenly spaced on a circle of `radius` around the
    /// origin, starting at `base_angle`.
    pub fn regular(sides: usize, radius: f64, base_angle: f64) -> Result<Self> {
        if sides < 3 {
            return Err(CityError::invalid(format!(
                "a regular polygon needs at least 3 sides, got {sides}"
            )));
        }
        if radius <= 0.0 {
            return Err(CityError::invalid(format!(
                "regular polygon radius must be positive, got {radius}"
            )));
        }
        let step = std::f64::consts::TAU / sides as f64;
        let points = (0..sides)
            .map(|i| {
                let a = base_angle + step * i as f64;
                Point2::new(a.cos(), a.sin()) * radius
            })
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Directed edges, the closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Shoelace area: positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Vertex average. For the convex-ish floor plans this generator deals
    /// in, a good enough apex anchor; it is not the area centroid.
    pub fn centroid(&self) -> Point2 {
        let sum: Point2 = self.points.iter().copied().sum();
        sum / self.points.len() as f64
    }

    /// Even-odd containment test. Points exactly on an edge may land on
    /// either side; callers sample strictly interior points.
    pub fn contains(&self, p: Point2) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// A copy shifted by `v`.
    pub fn translated(&self, v: Vector2) -> Self {
        Self {
            points: self.points.iter().map(|&p| p + v).collect(),
        }
    }

    /// A copy with reversed winding.
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// A copy wound counter-clockwise.
    pub fn oriented_ccw(&self) -> Self {
        if self.is_ccw() {
            self.clone()
        } else {
            self.reversed()
        }
    }
}

impl citygen_core::BoundingBox for Polygon {
    type Point = Point2;

    fn bounding_box(&self) -> (Point2, Point2) {
        let mut min = self.points[0];
        let mut max = self.points[0];
        for &p in &self.points[1..] {
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }
}

/// Shoelace formula over a raw ring.
pub(crate) fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}
