pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{CityError, Result};
pub use tolerance::Tolerance;
pub use traits::{BoundingBox, Validate};
