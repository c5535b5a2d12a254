//! Floor slabs and belt courses.

use citygen_core::{Result, Validate};
use citygen_geom::expand_polygon;
use citygen_math::Vector3;
use citygen_mesh::{thicken_polygon, Mesh};

use crate::params::BuildingParams;

/// Total height of the floor/belt stack: belts sit only between floors.
pub fn building_height(num_floors: u32, floor_height: f64, belt_height: f64) -> f64 {
    num_floors as f64 * floor_height + num_floors.saturating_sub(1) as f64 * belt_height
}

/// Build the stacked floor slabs and belt courses for a building.
///
/// Returns `(floors, belts)` as two meshes, since they carry different
/// colors downstream; the belt mesh is empty when the belt height is 0.
/// Each level is a fresh extrusion translated to its elevation, so no
/// geometry is aliased between repetitions. With a non-zero width delta the
/// footprint is recomputed per floor from the plan; otherwise the first
/// border is reused as-is.
pub fn make_floors(params: &BuildingParams) -> Result<(Mesh, Mesh)> {
    params.validate()?;

    let n = params.num_floors;
    let floor_height = params.floor_height;
    let belt_height = params.belt_height;
    let tapered = params.width_delta_per_floor != 0.0;

    let mut floors = Mesh::new();
    let mut belts = Mesh::new();
    let mut border = params.plan.border(0.0)?;
    for i in 0..n {
        if tapered && i > 0 {
            border = params.plan.border(params.width_delta_per_floor * i as f64)?;
        }
        let level = (floor_height + belt_height) * i as f64;
        let slab = thicken_polygon(&border, floor_height, &[])?;
        floors.merge(&slab.translated(Vector3::new(0.0, level, 0.0)));

        // One belt per floor boundary, none above the last floor.
        if belt_height > 0.0 && i + 1 < n {
            let ring = expand_polygon(&border, params.belt_extra_width)?;
            let belt = thicken_polygon(&ring, belt_height, &[])?;
            belts.merge(&belt.translated(Vector3::new(0.0, level + floor_height, 0.0)));
        }
    }
    Ok((floors, belts))
}
