//! Window placement along floor borders.

use citygen_core::{Result, Validate};
use citygen_math::{ground_angle, to_3d, Transform};
use citygen_rand::RandomSource;
use citygen_scene::Instance;

use crate::params::BuildingParams;

/// Place window instances along every side of every floor of a building.
///
/// Windows need a different material than the body, so they stay separate
/// instances sharing the two prototype meshes rather than being merged into
/// the building's geometry. Per side, as many windows as fit are spread
/// uniformly between the corner clearances; a single window is centered on
/// its side. Each candidate slot first rolls whether it is filled at all,
/// then a filled slot rolls open versus closed; the instance counter in the
/// names advances only for windows actually placed.
pub fn make_windows(params: &BuildingParams, rng: &mut RandomSource) -> Result<Vec<Instance>> {
    params.windows.validate()?;
    let spec = &params.windows;
    let width = spec
        .open_mesh
        .size()
        .x
        .max(spec.closed_mesh.size().x);

    let mut windows = Vec::new();
    let mut win_id = 0usize;
    for i in 0..params.num_floors {
        let border = params.plan.border(params.width_delta_per_floor * i as f64)?;
        let elevation =
            params.floor_height / 2.0 + (params.floor_height + params.belt_height) * i as f64;
        for (p1, p2) in border.edges() {
            let side = p2 - p1;
            let side_length = side.length();
            let mut eps = spec.edge_distance;
            if width + 2.0 * eps >= side_length {
                continue;
            }
            let n = ((side_length - width - 2.0 * eps) / (width + spec.spacing)) as u32 + 1;

            // Having found the count, spread the windows out uniformly.
            let spacing = if n > 1 {
                (side_length - 2.0 * eps - n as f64 * width) / (n as f64 - 1.0)
            } else {
                eps = (side_length - width) / 2.0;
                0.0
            };

            let dir = side / side_length;
            for j in 0..n {
                if !rng.bernoulli(spec.filled_ratio)? {
                    continue;
                }
                let center = p1 + dir * (eps + width / 2.0 + (width + spacing) * j as f64);
                let mesh = if rng.bernoulli(spec.open_ratio)? {
                    spec.open_mesh.clone()
                } else {
                    spec.closed_mesh.clone()
                };
                windows.push(Instance {
                    name: format!("{}_{}", spec.name, win_id),
                    mesh,
                    transform: Transform::from_ground_placement(
                        to_3d(center, elevation),
                        ground_angle(side),
                    ),
                });
                win_id += 1;
            }
        }
    }
    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{BuildingParams, FloorPlan, RoofSpec, WindowSpec};
    use citygen_geom::Polygon;
    use citygen_mesh::make_box;
    use glam::{dvec2, dvec3};
    use std::sync::Arc;

    fn square_building(side: f64, num_floors: u32, filled_ratio: f64) -> BuildingParams {
        let half = side / 2.0;
        let proto = Arc::new(make_box(2.0, 1.0, 0.1).unwrap());
        BuildingParams {
            id: "b0".into(),
            plan: FloorPlan::Border(
                Polygon::new(vec![
                    dvec2(-half, -half),
                    dvec2(half, -half),
                    dvec2(half, half),
                    dvec2(-half, half),
                ])
                .unwrap(),
            ),
            num_floors,
            floor_height: 3.0,
            belt_height: 0.3,
            belt_extra_width: 0.4,
            width_delta_per_floor: 0.0,
            wall_color: [0.8; 3],
            belt_color: [0.4; 3],
            roof: RoofSpec::None,
            roof_color: [0.5, 0.2, 0.2],
            trim_color: [0.3; 3],
            windows: WindowSpec {
                name: "b0_wnd".into(),
                spacing: 0.5,
                edge_distance: 0.5,
                open_mesh: proto.clone(),
                closed_mesh: proto,
                open_ratio: 0.5,
                filled_ratio,
            },
        }
    }

    #[test]
    fn test_count_per_side() {
        // Side 10, window width 2, clearance 0.5, spacing 0.5:
        // (10 - 2 - 1) / 2.5 rounds down to 2, so 3 windows per side.
        let params = square_building(10.0, 1, 1.0);
        let mut rng = RandomSource::from_seed(1);
        let windows = make_windows(&params, &mut rng).unwrap();
        assert_eq!(windows.len(), 12);
    }

    #[test]
    fn test_names_are_sequential() {
        let params = square_building(10.0, 1, 1.0);
        let mut rng = RandomSource::from_seed(1);
        let windows = make_windows(&params, &mut rng).unwrap();
        for (i, w) in windows.iter().enumerate() {
            assert_eq!(w.name, format!("b0_wnd_{i}"));
        }
    }

    #[test]
    fn test_elevation_per_floor() {
        let params = square_building(10.0, 2, 1.0);
        let mut rng = RandomSource::from_seed(1);
        let windows = make_windows(&params, &mut rng).unwrap();
        assert_eq!(windows.len(), 24);
        let origins: Vec<f64> = windows
            .iter()
            .map(|w| w.transform.transform_point(dvec3(0.0, 0.0, 0.0)).y)
            .collect();
        // Half the floor height, then one floor+belt pitch up.
        assert!(origins[..12].iter().all(|&y| (y - 1.5).abs() < 1e-9));
        assert!(origins[12..].iter().all(|&y| (y - 4.8).abs() < 1e-9));
    }

    #[test]
    fn test_single_window_is_centered() {
        // Side 4: only one window fits, centered on the side.
        let params = square_building(4.0, 1, 1.0);
        let mut rng = RandomSource::from_seed(1);
        let windows = make_windows(&params, &mut rng).unwrap();
        assert_eq!(windows.len(), 4);
        let origin = windows[0]
            .transform
            .transform_point(dvec3(0.0, 0.0, 0.0));
        // First side of the CCW square runs along x at z = -2.
        assert!(origin.x.abs() < 1e-9);
        assert!((origin.z + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_side_too_short_for_any_window() {
        // Width 2 plus clearances 1 leaves no room on a side of 3.
        let params = square_building(3.0, 1, 1.0);
        let mut rng = RandomSource::from_seed(1);
        assert!(make_windows(&params, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_filled_ratio_zero_places_nothing() {
        let params = square_building(10.0, 3, 0.0);
        let mut rng = RandomSource::from_seed(1);
        assert!(make_windows(&params, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_window_faces_along_its_side() {
        let params = square_building(10.0, 1, 1.0);
        let mut rng = RandomSource::from_seed(1);
        let windows = make_windows(&params, &mut rng).unwrap();
        // First side runs in ground +x, so local +x stays +x in 3D.
        let x = windows[0].transform.transform_vector(dvec3(1.0, 0.0, 0.0));
        assert!((x - dvec3(1.0, 0.0, 0.0)).length() < 1e-9);
        // A later side runs in ground -x (the top of the square).
        let x = windows[6].transform.transform_vector(dvec3(1.0, 0.0, 0.0));
        assert!((x - dvec3(-1.0, 0.0, 0.0)).length() < 1e-9);
    }
}
