//! sgt-core: stable foundation for sgtherm.
//!
//! Contains:
//! - units (uom quantities + US-customary constructors and conversions)
//! - numeric (Real + tolerances + interpolation helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
