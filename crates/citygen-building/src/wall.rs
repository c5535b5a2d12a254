//! Free-standing wall solids.

use citygen_core::{CityError, Result};
use citygen_geom::{expand_polygon, offset_polygon, widen_polyline_border, Polygon};
use citygen_math::Point2;
use citygen_mesh::{thicken_polygon, Mesh};

/// Build a wall of the given thickness and height along a centerline.
///
/// Open walls widen the polyline into a ribbon and extrude it. Closed walls
/// treat the points as a ring: the outer border is the ring expanded by half
/// the thickness and the inner ring, inset by the other half and reversed,
/// becomes a hole, so the extrusion encloses a courtyard.
pub fn make_wall(points: &[Point2], thickness: f64, height: f64, closed: bool) -> Result<Mesh> {
    if thickness <= 0.0 {
        return Err(CityError::invalid(format!(
            "wall thickness must be positive, got {thickness}"
        )));
    }
    if height <= 0.0 {
        return Err(CityError::invalid(format!(
            "wall height must be positive, got {height}"
        )));
    }

    if !closed {
        let border = widen_polyline_border(points, thickness)?;
        return thicken_polygon(&border, height, &[]);
    }

    let ring = Polygon::new(points.to_vec())?;
    let outer = expand_polygon(&ring, thickness / 2.0)?;
    let inner = offset_polygon(&ring, -thickness / 2.0)
        .into_iter()
        .next()
        .ok_or_else(|| {
            CityError::invalid(format!(
                "wall ring collapsed under inset {}",
                thickness / 2.0
            ))
        })?
        .reversed();
    thicken_polygon(&outer, height, &[inner])
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn test_open_wall_extent() {
        let wall = make_wall(&[dvec2(0.0, 0.0), dvec2(10.0, 0.0)], 0.5, 2.0, false).unwrap();
        let bb = wall.bounding_box().unwrap();
        // Ribbon ends are lengthened by half the thickness.
        assert!((bb.min.x + 0.25).abs() < 1e-9);
        assert!((bb.max.x - 10.25).abs() < 1e-9);
        assert!((bb.max.z - 0.25).abs() < 1e-9);
        assert!((bb.max.y - 2.0).abs() < 1e-9);
        assert!(bb.min.y.abs() < 1e-9);
    }

    #[test]
    fn test_closed_wall_encloses_a_courtyard() {
        let ring = [
            dvec2(-2.0, -2.0),
            dvec2(2.0, -2.0),
            dvec2(2.0, 2.0),
            dvec2(-2.0, 2.0),
        ];
        let wall = make_wall(&ring, 0.5, 3.0, true).unwrap();
        // Outer and inner faces of the square circuit.
        assert_eq!(wall.quad_count(), 8);
        let bb = wall.bounding_box().unwrap();
        assert!((bb.max.x - 2.25).abs() < 1e-9);
        assert!((bb.max.y - 3.0).abs() < 1e-9);
        // Cap area covers the annulus only, not the courtyard.
        let cap_area: f64 = wall
            .triangles
            .iter()
            .map(|t| {
                let [a, b, c] = t.map(|i| wall.positions[i as usize]);
                (b - a).cross(c - a).length() / 2.0
            })
            .sum();
        let annulus = 4.5 * 4.5 - 3.5 * 3.5;
        assert!((cap_area - 2.0 * annulus).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_degenerate_input() {
        let line = [dvec2(0.0, 0.0), dvec2(1.0, 0.0)];
        assert!(make_wall(&line, 0.0, 2.0, false).is_err());
        assert!(make_wall(&line, 0.5, 0.0, false).is_err());
        assert!(make_wall(&[dvec2(0.0, 0.0)], 0.5, 2.0, false).is_err());
        // A closed wall needs a real ring.
        assert!(make_wall(&line, 0.5, 2.0, true).is_err());
    }
}
