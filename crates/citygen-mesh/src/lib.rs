//! Citygen mesh layer: the indexed mesh data model, the constrained-Delaunay
//! triangulation adapter, prism extrusion of polygons-with-holes, and the box
//! primitive used for window prototypes.

pub mod extrude;
pub mod mesh;
pub mod primitives;
pub mod triangulate;

pub use extrude::thicken_polygon;
pub use mesh::Mesh;
pub use primitives::make_box;
pub use triangulate::{triangulate, CapTriangulation};
