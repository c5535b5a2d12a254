pub mod aabb;
pub mod lift;
pub mod transform;

pub use glam::{DMat4, DVec2, DVec3};

pub use aabb::Aabb3;
pub use lift::{ground_angle, lift, to_2d, to_3d};
pub use transform::Transform;

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
