//! tc-core: stable foundation for turbocycle.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + finite/range checks + guarded float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TcError, TcResult};
pub use numeric::*;
pub use units::*;
