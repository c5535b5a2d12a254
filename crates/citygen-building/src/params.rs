//! Building parameter records.
//!
//! Each record is a sum type carrying only its variant's payload; dispatch
//! downstream is a pattern match. A record owns no generated meshes and is
//! discarded after one composer call; only the window prototypes are shared.

use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

use citygen_core::{CityError, Result, Validate};
use citygen_geom::{offset_polygon, widen_polyline_border, Polygon};
use citygen_math::{ground_angle, Point2};
use citygen_mesh::Mesh;
use serde::{Deserialize, Serialize};

/// How a building's footprint is described. Exactly one representation is
/// active per building.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FloorPlan {
    /// A centerline polyline widened into a ribbon; used for elongated,
    /// segmented buildings. The polyline vertices are the building's main
    /// points.
    MainPoints { points: Vec<Point2>, width: f64 },
    /// A directly supplied closed border.
    Border(Polygon),
    /// A regular polygon given as center, one vertex, and side count.
    Regular {
        center: Point2,
        vertex: Point2,
        sides: usize,
    },
}

impl FloorPlan {
    /// The footprint border with `extra_width` added all around, as used by
    /// tapered buildings at floors above the first. Selects the first ring
    /// when an inward offset of a border plan could split; the configured
    /// per-floor deltas are assumed small enough that it never does.
    pub fn border(&self, extra_width: f64) -> Result<Polygon> {
        match self {
            FloorPlan::MainPoints { points, width } => {
                widen_polyline_border(points, width + extra_width)
            }
            FloorPlan::Border(border) => {
                if extra_width == 0.0 {
                    Ok(border.clone())
                } else {
                    offset_polygon(border, extra_width)
                        .into_iter()
                        .next()
                        .ok_or_else(|| {
                            CityError::invalid(format!(
                                "floor border collapsed under offset {extra_width}"
                            ))
                        })
                }
            }
            FloorPlan::Regular {
                center,
                vertex,
                sides,
            } => {
                let radius_segment = *vertex - *center;
                let polygon = Polygon::regular(
                    *sides,
                    radius_segment.length() + extra_width,
                    ground_angle(radius_segment),
                )?;
                Ok(polygon.translated(*center))
            }
        }
    }
}

impl Validate for FloorPlan {
    fn validate(&self) -> Result<()> {
        match self {
            FloorPlan::MainPoints { points, width } => {
                if points.len() < 2 {
                    return Err(CityError::invalid(format!(
                        "a main-points plan needs at least 2 points, got {}",
                        points.len()
                    )));
                }
                if *width <= 0.0 {
                    return Err(CityError::invalid(format!(
                        "floor width must be positive, got {width}"
                    )));
                }
                Ok(())
            }
            FloorPlan::Border(_) => Ok(()),
            FloorPlan::Regular { center, vertex, sides } => {
                if *sides < 3 {
                    return Err(CityError::invalid(format!(
                        "a regular plan needs at least 3 sides, got {sides}"
                    )));
                }
                if center.distance_squared(*vertex) < 1e-24 {
                    return Err(CityError::invalid(
                        "regular plan vertex coincides with its center",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Thickened-rafter trim for gable roofs: a visible roof slab of the given
/// material thickness, with rake (gable-end) and eave overhangs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RafterTrim {
    pub thickness: f64,
    pub rake_overhang: f64,
    pub roof_overhang: f64,
}

impl Validate for RafterTrim {
    fn validate(&self) -> Result<()> {
        if self.thickness <= 0.0 {
            return Err(CityError::invalid(format!(
                "rafter thickness must be positive, got {}",
                self.thickness
            )));
        }
        if self.rake_overhang < 0.0 || self.roof_overhang < 0.0 {
            return Err(CityError::invalid(format!(
                "overhangs must be non-negative, got rake {} / roof {}",
                self.rake_overhang, self.roof_overhang
            )));
        }
        Ok(())
    }
}

/// Roof construction, carrying only the fields its kind needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RoofSpec {
    /// Flat top, no roof mesh.
    None,
    /// Continuous gable along the main-points centerline; `angle` is the
    /// slope in (0, pi/2).
    CrossGabled {
        angle: f64,
        trim: Option<RafterTrim>,
    },
    /// Gable with both end ridge points pulled inward by `hip_depth`.
    /// The depth must stay below each end segment's length (lengthened ends
    /// included); that is a caller precondition, not validated here.
    CrossHipped { angle: f64, hip_depth: f64 },
    /// Triangle fan from the floor border to a single apex above the
    /// border's centroid.
    Pyramid { apex_height: f64 },
}

impl Validate for RoofSpec {
    fn validate(&self) -> Result<()> {
        match self {
            RoofSpec::None => Ok(()),
            RoofSpec::CrossGabled { angle, trim } => {
                check_roof_angle(*angle)?;
                if let Some(trim) = trim {
                    trim.validate()?;
                }
                Ok(())
            }
            RoofSpec::CrossHipped { angle, hip_depth } => {
                check_roof_angle(*angle)?;
                if *hip_depth < 0.0 {
                    return Err(CityError::invalid(format!(
                        "hip depth must be non-negative, got {hip_depth}"
                    )));
                }
                Ok(())
            }
            RoofSpec::Pyramid { apex_height } => {
                if *apex_height <= 0.0 {
                    return Err(CityError::invalid(format!(
                        "pyramid apex height must be positive, got {apex_height}"
                    )));
                }
                Ok(())
            }
        }
    }
}

pub(crate) fn check_roof_angle(angle: f64) -> Result<()> {
    if angle <= 0.0 || angle >= FRAC_PI_2 {
        return Err(CityError::invalid(format!(
            "roof angle must lie in (0, pi/2), got {angle}"
        )));
    }
    Ok(())
}

/// Window array parameters. The two prototype meshes are assumed centered
/// at the origin on all three axes and are shared across every placement.
#[derive(Debug, Clone)]
pub struct WindowSpec {
    /// Name prefix for the placed window instances.
    pub name: String,
    /// Desired spacing between neighbouring windows.
    pub spacing: f64,
    /// Minimum clearance between a window and its side's corners.
    pub edge_distance: f64,
    pub open_mesh: Arc<Mesh>,
    pub closed_mesh: Arc<Mesh>,
    /// Probability that a placed window uses the open prototype.
    pub open_ratio: f64,
    /// Probability that a candidate slot receives a window at all.
    pub filled_ratio: f64,
}

impl Validate for WindowSpec {
    fn validate(&self) -> Result<()> {
        if self.spacing < 0.0 {
            return Err(CityError::invalid(format!(
                "window spacing must be non-negative, got {}",
                self.spacing
            )));
        }
        if self.edge_distance < 0.0 {
            return Err(CityError::invalid(format!(
                "window edge distance must be non-negative, got {}",
                self.edge_distance
            )));
        }
        for (label, ratio) in [("open", self.open_ratio), ("filled", self.filled_ratio)] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(CityError::invalid(format!(
                    "{label} window ratio must lie in [0, 1], got {ratio}"
                )));
            }
        }
        if self.open_mesh.is_empty() || self.closed_mesh.is_empty() {
            return Err(CityError::invalid("window prototype meshes must not be empty"));
        }
        Ok(())
    }
}

/// Everything needed to generate one building. Constructed once, consumed
/// by the composer together with a random source, then discarded.
#[derive(Debug, Clone)]
pub struct BuildingParams {
    /// Name prefix shared by all of the building's instances.
    pub id: String,
    pub plan: FloorPlan,
    pub num_floors: u32,
    pub floor_height: f64,
    /// Belt course height; 0 disables the belt.
    pub belt_height: f64,
    /// How much wider the belt course is than its floor.
    pub belt_extra_width: f64,
    /// Footprint growth per floor: positive tapers outward, negative inward.
    pub width_delta_per_floor: f64,
    pub wall_color: [f32; 3],
    pub belt_color: [f32; 3],
    pub roof: RoofSpec,
    pub roof_color: [f32; 3],
    pub trim_color: [f32; 3],
    pub windows: WindowSpec,
}

impl Validate for BuildingParams {
    fn validate(&self) -> Result<()> {
        if self.num_floors == 0 {
            return Err(CityError::invalid("a building needs at least 1 floor"));
        }
        if self.floor_height <= 0.0 {
            return Err(CityError::invalid(format!(
                "floor height must be positive, got {}",
                self.floor_height
            )));
        }
        if self.belt_height < 0.0 {
            return Err(CityError::invalid(format!(
                "belt height must be non-negative, got {}",
                self.belt_height
            )));
        }
        if self.belt_extra_width < 0.0 {
            return Err(CityError::invalid(format!(
                "belt extra width must be non-negative, got {}",
                self.belt_extra_width
            )));
        }
        self.plan.validate()?;
        self.roof.validate()?;
        self.windows.validate()
    }
}
