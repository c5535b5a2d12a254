//! Random building parameter synthesis.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI};
use std::sync::Arc;

use citygen_core::Result;
use citygen_geom::{segmented_line, Polygon};
use citygen_math::Point2;
use citygen_mesh::{make_box, Mesh};
use citygen_rand::RandomSource;
use citygen_scene::Instance;

use crate::params::{BuildingParams, FloorPlan, RafterTrim, RoofSpec, WindowSpec};

/// The two shared window prototype meshes: an open (glazed) pane and a
/// closed (shuttered) one, both centered at the origin.
pub fn window_prototypes() -> Result<(Arc<Mesh>, Arc<Mesh>)> {
    let open = make_box(1.6, 1.0, 0.1)?.painted([0.8, 0.8, 1.0]);
    let closed = make_box(1.0, 1.0, 0.1)?.painted([0.3, 0.1, 0.0]);
    Ok((Arc::new(open), Arc::new(closed)))
}

#[derive(Clone, Copy)]
enum RoofKind {
    Gabled,
    Hipped,
    Pyramid,
    None,
}

/// Draw a complete parameter set for one building.
///
/// Plan kinds are weighted 80 main-points / 5 border / 20 regular. The
/// main-points centerline meanders upward from the origin: 3 to 8 segments,
/// each turning by a nonzero angle within ±60 degrees and advancing by
/// roughly 10 units. Roof kinds depend on the plan, since ridge roofs only
/// ride a centerline. All draws come from the passed stream, so a seed fully
/// determines the building.
pub fn random_building_params(
    rng: &mut RandomSource,
    open_window: Arc<Mesh>,
    closed_window: Arc<Mesh>,
    id: &str,
) -> Result<BuildingParams> {
    let plan = random_plan(rng)?;

    let num_floors = rng.uniform_int(3, 8)?;
    let floor_height = rng.uniform(2.5, 5.0)?;
    let belt_height = rng.uniform(0.25, 0.45)?;
    let belt_extra_width = rng.uniform(0.25, 0.45)?;
    let width_delta_per_floor = rng.uniform(-0.15, 2.0)?;
    let wall_color = rng.color();
    let belt_color = rng.color();

    let kind = match &plan {
        FloorPlan::MainPoints { .. } => *rng.weighted_choice(
            &[
                RoofKind::Gabled,
                RoofKind::Hipped,
                RoofKind::Pyramid,
                RoofKind::None,
            ],
            &[75.0, 10.0, 10.0, 5.0],
        )?,
        _ => *rng.weighted_choice(&[RoofKind::Pyramid, RoofKind::None], &[85.0, 15.0])?,
    };
    let roof_color = rng.color();
    let trim_color = rng.color();
    let roof = match kind {
        RoofKind::Gabled => RoofSpec::CrossGabled {
            angle: rng.uniform(PI / 10.0, FRAC_PI_3)?,
            trim: Some(RafterTrim {
                thickness: rng.uniform(0.25, 0.75)?,
                rake_overhang: rng.uniform(0.1, 2.0)?,
                roof_overhang: rng.uniform(0.1, 1.0)?,
            }),
        },
        RoofKind::Hipped => {
            let angle = rng.uniform(PI / 10.0, FRAC_PI_3)?;
            // Cap the depth below the shorter of the two end segments, or
            // the pulled ridge ends would cross.
            let max_depth = match &plan {
                FloorPlan::MainPoints { points, .. } => {
                    let first = points[0].distance(points[1]);
                    let last = points[points.len() - 1].distance(points[points.len() - 2]);
                    (first.min(last) * 0.9).max(0.0)
                }
                _ => 0.0,
            };
            RoofSpec::CrossHipped {
                angle,
                hip_depth: rng.uniform(0.0, max_depth)?,
            }
        }
        RoofKind::Pyramid => RoofSpec::Pyramid {
            apex_height: rng.uniform(3.0, 13.0)?,
        },
        RoofKind::None => RoofSpec::None,
    };

    let windows = WindowSpec {
        name: format!("{id}_wnd"),
        spacing: rng.uniform(0.1, 0.5)?,
        edge_distance: rng.uniform(0.2, 0.5)?,
        open_mesh: open_window,
        closed_mesh: closed_window,
        open_ratio: rng.uniform(0.0, 1.0)?,
        filled_ratio: rng.uniform(0.0, 1.0)?,
    };

    Ok(BuildingParams {
        id: format!("{id}_building"),
        plan,
        num_floors,
        floor_height,
        belt_height,
        belt_extra_width,
        width_delta_per_floor,
        wall_color,
        belt_color,
        roof,
        roof_color,
        trim_color,
        windows,
    })
}

fn random_plan(rng: &mut RandomSource) -> Result<FloorPlan> {
    match *rng.weighted_choice(&[0, 1, 2], &[80.0, 5.0, 20.0])? {
        0 => {
            let segments = rng.uniform_int(3, 8)? as usize;
            // The generators feeding segmented_line are plain closures, so
            // the draws happen up front.
            let mut deltas = Vec::with_capacity(segments - 1);
            for _ in 1..segments {
                let mut v = 0.0;
                while v == 0.0 {
                    v = rng.uniform(-FRAC_PI_3, FRAC_PI_3)?;
                }
                deltas.push(v);
            }
            let mut lengths = Vec::with_capacity(segments);
            for _ in 0..segments {
                let mut len = rng.gaussian(10.0, 1.0)?;
                while len <= 0.0 {
                    len = rng.gaussian(10.0, 1.0)?;
                }
                lengths.push(len);
            }
            let mut deltas = deltas.into_iter();
            let mut lengths = lengths.into_iter();
            let points = segmented_line(
                Point2::ZERO,
                segments,
                FRAC_PI_2,
                move || deltas.next().unwrap_or(0.0),
                move || lengths.next().unwrap_or(10.0),
            )?;
            Ok(FloorPlan::MainPoints {
                points,
                width: rng.uniform(5.0, 15.0)?,
            })
        }
        1 => Ok(FloorPlan::Border(star_footprint()?)),
        _ => {
            let sides = rng.uniform_int(3, 4)? as usize;
            let radius = rng.uniform(5.0, 15.0)?;
            let base_angle = rng.uniform(0.0, PI)?;
            let vertex = Point2::new(base_angle.cos(), base_angle.sin()) * radius;
            Ok(FloorPlan::Regular {
                center: Point2::ZERO,
                vertex,
                sides,
            })
        }
    }
}

/// The fixed eight-point star footprint used by the border plan variant.
fn star_footprint() -> Result<Polygon> {
    Polygon::new(vec![
        Point2::new(10.0, 10.0),
        Point2::new(0.0, 5.0),
        Point2::new(-10.0, 10.0),
        Point2::new(-5.0, 0.0),
        Point2::new(-10.0, -10.0),
        Point2::new(0.0, -5.0),
        Point2::new(10.0, -10.0),
        Point2::new(5.0, 0.0),
    ])
}

/// Convenience used in tests and demos: synthesize parameters and compose
/// the building in one call.
pub fn random_building(rng: &mut RandomSource, id: &str) -> Result<Vec<Instance>> {
    let (open, closed) = window_prototypes()?;
    let params = random_building_params(rng, open, closed, id)?;
    crate::building::make_building(&params, rng)
}
