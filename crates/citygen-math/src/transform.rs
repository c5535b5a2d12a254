use crate::{DMat4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Rigid placement (rotation + translation, no shear/scale).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        Self::from_mat4(DMat4::IDENTITY)
    }

    pub fn from_translation(t: Vector3) -> Self {
        Self::from_mat4(DMat4::from_translation(t))
    }

    /// Placement on the ground plane: translate to `origin` and yaw so that
    /// local +x aligns with the ground direction `angle` (radians from +x
    /// toward +y in ground coordinates).
    ///
    /// Ground (x, y) lifts to (x, e, y), which reads left-handed from +y;
    /// the yaw sign compensates so +x lands on (cos angle, 0, sin angle).
    pub fn from_ground_placement(origin: Point3, angle: f64) -> Self {
        Self::from_mat4(DMat4::from_translation(origin) * DMat4::from_rotation_y(-angle))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().transform_point3(p)
    }

    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        self.to_mat4().transform_vector3(v)
    }

    /// Apply `self`, then `other`.
    pub fn then(&self, other: &Transform) -> Transform {
        Self::from_mat4(other.to_mat4() * self.to_mat4())
    }

    pub fn inverse(&self) -> Option<Transform> {
        let m = self.to_mat4();
        if m.determinant().abs() < 1e-15 {
            None
        } else {
            Some(Self::from_mat4(m.inverse()))
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
