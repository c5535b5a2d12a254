/// Numeric tolerances shared across the geometry pipeline.
///
/// The linear tolerance drives duplicate-position merging after cap
/// triangulation and the area cutoff below which a collapsed offset ring is
/// discarded. The angular tolerance is used for angle comparisons.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Distance cutoff, in model units.
    pub linear: f64,
    /// Angle cutoff, in radians.
    pub angular: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-7;
    pub const DEFAULT_ANGULAR: f64 = 1e-10;

    pub fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }

    pub fn default_precision() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            angular: Self::DEFAULT_ANGULAR,
        }
    }

    /// Forgiving preset for meshes assembled from many merged parts.
    pub fn loose() -> Self {
        Self {
            linear: 1e-4,
            angular: 1e-6,
        }
    }

    pub fn tight() -> Self {
        Self {
            linear: 1e-10,
            angular: 1e-12,
        }
    }

    /// Two lengths agree within the linear tolerance.
    pub fn linear_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear
    }

    /// A length indistinguishable from zero.
    pub fn is_zero(self, v: f64) -> bool {
        v.abs() < self.linear
    }

    /// Two angles agree within the angular tolerance.
    pub fn angular_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.angular
    }

    /// Whether a signed ring area is too small to keep after offsetting.
    pub fn degenerate_area(self, area: f64) -> bool {
        area.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
