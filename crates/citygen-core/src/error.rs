use thiserror::Error;

/// Failures raised by the generation pipeline.
///
/// Every condition is detected eagerly at the start of the offending
/// operation; a failed call leaves no partially built geometry behind.
#[derive(Debug, Error)]
pub enum CityError {
    /// Malformed geometric input: too few points, non-positive sizes,
    /// angles outside their domain, ratios outside [0, 1], mismatched
    /// vector lengths.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A structurally valid request that this generator cannot satisfy,
    /// e.g. a gabled roof on a regular floor plan.
    #[error("Unsupported combination: {0}")]
    UnsupportedCombination(String),
}

pub type Result<T> = std::result::Result<T, CityError>;

impl CityError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CityError::InvalidArgument(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        CityError::UnsupportedCombination(msg.into())
    }
}
