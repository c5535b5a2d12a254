//! The per-building composer.

use std::sync::Arc;

use citygen_core::{CityError, Result, Validate};
use citygen_math::{Point2, Transform};
use citygen_mesh::Mesh;
use citygen_rand::RandomSource;
use citygen_scene::Instance;

use crate::floors::{building_height, make_floors};
use crate::params::{BuildingParams, FloorPlan, RoofSpec};
use crate::roof;
use crate::windows::make_windows;

/// Generate every instance of one building, in local coordinates with the
/// ground floor at elevation 0.
///
/// The body becomes up to four merged-mesh instances (floor stack, belt
/// stack, roof body, rafter trim; empty ones are dropped), each painted its
/// own color; windows follow as individual prototype placements. Validation
/// runs up front and any failure propagates before a single instance is
/// produced.
pub fn make_building(params: &BuildingParams, rng: &mut RandomSource) -> Result<Vec<Instance>> {
    params.validate()?;

    let mut instances = Vec::new();
    let (floors, belts) = make_floors(params)?;
    instances.push(Instance::new(
        format!("{}_floors", params.id),
        Arc::new(floors.painted(params.wall_color)),
        Transform::identity(),
    ));
    if !belts.is_empty() {
        instances.push(Instance::new(
            format!("{}_belts", params.id),
            Arc::new(belts.painted(params.belt_color)),
            Transform::identity(),
        ));
    }

    let base_height = building_height(params.num_floors, params.floor_height, params.belt_height);
    // Tapered buildings carry the roof on the top floor's footprint.
    let top_extra = params.width_delta_per_floor * (params.num_floors - 1) as f64;

    let (roof_mesh, trim_mesh) = match &params.roof {
        RoofSpec::None => (None, None),
        RoofSpec::CrossGabled { angle, trim } => {
            let (points, width) = require_main_points(params, top_extra)?;
            let body = roof::cross_gabled(points, width, *angle, base_height)?;
            let trim = match trim {
                Some(t) => Some(roof::cross_gabled_rafters(
                    points,
                    width,
                    *angle,
                    t,
                    base_height,
                )?),
                None => None,
            };
            (Some(body), trim)
        }
        RoofSpec::CrossHipped { angle, hip_depth } => {
            let (points, width) = require_main_points(params, top_extra)?;
            let body = roof::cross_hipped(points, width, *angle, *hip_depth, base_height)?;
            (Some(body), None)
        }
        RoofSpec::Pyramid { apex_height } => {
            let border = params.plan.border(top_extra)?;
            (Some(roof::pyramid(&border, *apex_height, base_height)?), None)
        }
    };
    push_painted(&mut instances, &params.id, "roof", roof_mesh, params.roof_color);
    push_painted(&mut instances, &params.id, "trim", trim_mesh, params.trim_color);

    instances.extend(make_windows(params, rng)?);

    tracing::debug!(
        id = %params.id,
        instances = instances.len(),
        "building generated"
    );
    Ok(instances)
}

fn push_painted(
    instances: &mut Vec<Instance>,
    id: &str,
    suffix: &str,
    mesh: Option<Mesh>,
    color: [f32; 3],
) {
    if let Some(mesh) = mesh {
        if !mesh.is_empty() {
            instances.push(Instance::new(
                format!("{id}_{suffix}"),
                Arc::new(mesh.painted(color)),
                Transform::identity(),
            ));
        }
    }
}

/// Gabled and hipped roofs ride the main-points centerline; other plans have
/// no ridge to build along.
fn require_main_points(params: &BuildingParams, extra: f64) -> Result<(&[Point2], f64)> {
    match &params.plan {
        FloorPlan::MainPoints { points, width } => Ok((points, width + extra)),
        _ => Err(CityError::unsupported(
            "gabled and hipped roofs need a main-points floor plan",
        )),
    }
}
