//! Citygen building layer: parametrized architectural elements (floor/belt
//! stacks, roofs, window arrays, walls), the per-building composer, random
//! parameter synthesis, and whole-city layout.

pub mod building;
pub mod city;
pub mod floors;
pub mod params;
pub mod roof;
pub mod synth;
pub mod wall;
pub mod windows;

pub use building::make_building;
pub use city::generate_city;
pub use floors::{building_height, make_floors};
pub use params::{BuildingParams, FloorPlan, RafterTrim, RoofSpec, WindowSpec};
pub use roof::{cross_gabled, cross_gabled_rafters, cross_hipped, pyramid};
pub use synth::{random_building, random_building_params, window_prototypes};
pub use wall::make_wall;
pub use windows::make_windows;
