//! Ground-plane conventions.
//!
//! All polygon math happens in 2D ground coordinates; elevation is added only
//! when geometry is lifted into 3D. A ground point (x, y) lifts to (x, e, y)
//! with y-up, and 3D points project back by discarding their elevation.

use crate::{Point2, Point3, Vector2};

/// Lift a ground-plane point to 3D at the given elevation.
pub fn to_3d(p: Point2, elevation: f64) -> Point3 {
    Point3::new(p.x, elevation, p.y)
}

/// Project a 3D point onto the ground plane, discarding elevation.
pub fn to_2d(p: Point3) -> Point2 {
    Point2::new(p.x, p.z)
}

/// Lift a run of ground points to a common elevation.
pub fn lift(points: &[Point2], elevation: f64) -> Vec<Point3> {
    points.iter().map(|&p| to_3d(p, elevation)).collect()
}

/// Angle of a ground direction, measured from +x toward +y.
pub fn ground_angle(v: Vector2) -> f64 {
    v.y.atan2(v.x)
}
