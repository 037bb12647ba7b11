//! Real-time gas-turbine cycle simulation.
//!
//! Provides:
//! - Inputs / Design / State / Stations data model
//! - Rate-limited spool dynamics with an idle governor
//! - Station-by-station cycle solver for turbojet, turbofan, ramjet and rocket
//! - `EngineModel`, the per-tick entry point for hosts
//! - Scenario runner with scheduled input changes

pub mod cycle;
pub mod design;
pub mod engine;
pub mod error;
pub mod inputs;
pub mod sim;
pub mod spool;
pub mod state;
pub mod timestep;

// Re-exports for public API
pub use cycle::{CycleSolution, CycleSolver};
pub use design::{Design, EngineType, Efficiencies};
pub use engine::EngineModel;
pub use error::{SimError, SimResult};
pub use inputs::{InputPatch, Inputs};
pub use sim::{Schedule, ScheduledPatch, SimOptions, SimRecord, run_scenario};
pub use spool::{RUN_THRESHOLD_PCT, advance_spool, governed_target};
pub use state::{EngineSnapshot, EngineState, StationId, StationState, Stations};
pub use timestep::StepPolicy;
