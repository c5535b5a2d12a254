//! Citygen polygon algebra: closed 2D borders, polyline widening, polygon
//! offsetting, and segmented-line generation.

pub mod offset;
pub mod polygon;
pub mod polyline;

pub use offset::{expand_polygon, offset_polygon};
pub use polygon::Polygon;
pub use polyline::{segmented_line, widen_polyline, widen_polyline_border, widen_polyline_sides};
