//! Gas-path component models for turbocycle.
//!
//! Components are stateless over a tick: each one maps an inlet [`GasState`]
//! plus its own fixed parameters to an exit state. Engine-type specific
//! compression is expressed through the [`CompressionStage`] trait.

pub mod atmosphere;
pub mod combustor;
pub mod common;
pub mod compression;
pub mod error;
pub mod fan;
pub mod gas;
pub mod intake;
pub mod nozzle;
pub mod turbine;

// Re-exports for public API
pub use atmosphere::{AmbientState, resolve_ambient, standard_atmosphere};
pub use combustor::{Combustor, CombustorExit, FuelCharge, combustion_intensity};
pub use common::GasState;
pub use compression::{AxialCompressor, CompressionStage, PropellantFeed, RamDiffuser};
pub use error::{ComponentError, ComponentResult};
pub use fan::Fan;
pub use intake::ram_recovery;
pub use nozzle::{Nozzle, NozzleExit};
pub use turbine::{Turbine, TurbineExit};
