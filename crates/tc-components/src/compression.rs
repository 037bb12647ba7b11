//! Compression strategies, one per engine type.

use crate::common::{GasState, check_efficiency, check_finite};
use crate::error::{ComponentError, ComponentResult};
use crate::gas::{CP_AIR, compression_exit_temperature};

/// Rocket chamber pressure at full throttle (Pa)
pub const ROCKET_CHAMBER_PRESSURE: f64 = 3.0e6;
/// Propellant feed temperature into the rocket chamber (K)
pub const PROPELLANT_FEED_TEMPERATURE: f64 = 300.0;
/// Total pressure recovery of a ramjet diffuser
pub const RAM_RECOVERY: f64 = 0.95;

/// Raises the gas from station 2 to combustor inlet (station 3).
///
/// Implementations are selected once per engine design; the cycle solver only
/// sees this trait.
pub trait CompressionStage {
    /// Stage name for logging.
    fn name(&self) -> &str;

    /// Combustor inlet conditions for the given intake state and spool fraction.
    fn compress(&self, inlet: &GasState, spool_fraction: f64) -> GasState;

    /// Shaft work per kg of core flow needed to drive this stage (J/kg).
    ///
    /// Stages without rotating machinery need none.
    fn specific_work(&self, _inlet: &GasState, _exit: &GasState) -> f64 {
        0.0
    }

    /// Whether this stage draws air through the intake.
    ///
    /// Non-breathing stages take no ram drag and ignore inlet density.
    fn breathes_air(&self) -> bool {
        true
    }
}

/// Shaft-driven axial compressor of a turbojet or turbofan core.
///
/// ```text
/// PR = 1 + (PR_design - 1)·f²
/// T3 = T2·(1 + (PR^0.286 - 1)/eta)
/// P3 = P2·PR
/// ```
#[derive(Clone, Debug)]
pub struct AxialCompressor {
    /// Pressure ratio at 100% spool
    pub design_pressure_ratio: f64,
    /// Compression efficiency (0 < eta <= 1)
    pub eta: f64,
}

impl AxialCompressor {
    pub fn new(design_pressure_ratio: f64, eta: f64) -> ComponentResult<Self> {
        check_finite(design_pressure_ratio, "compressor pressure ratio")?;
        if design_pressure_ratio < 1.0 {
            return Err(ComponentError::InvalidArg {
                what: "compressor pressure ratio must be at least 1",
            });
        }
        let eta = check_efficiency(eta, "compressor efficiency")?;
        Ok(Self {
            design_pressure_ratio,
            eta,
        })
    }

    /// Pressure ratio at a spool fraction.
    pub fn pressure_ratio(&self, spool_fraction: f64) -> f64 {
        1.0 + (self.design_pressure_ratio - 1.0) * spool_fraction * spool_fraction
    }
}

impl CompressionStage for AxialCompressor {
    fn name(&self) -> &str {
        "axial compressor"
    }

    fn compress(&self, inlet: &GasState, spool_fraction: f64) -> GasState {
        let pr = self.pressure_ratio(spool_fraction);
        GasState {
            pressure_pa: inlet.pressure_pa * pr,
            temperature_k: compression_exit_temperature(inlet.temperature_k, pr, self.eta),
        }
    }

    fn specific_work(&self, inlet: &GasState, exit: &GasState) -> f64 {
        CP_AIR * (exit.temperature_k - inlet.temperature_k)
    }
}

/// Ramjet diffuser: no machinery, recovery loss only.
#[derive(Clone, Debug)]
pub struct RamDiffuser {
    pub recovery: f64,
}

impl Default for RamDiffuser {
    fn default() -> Self {
        Self {
            recovery: RAM_RECOVERY,
        }
    }
}

impl CompressionStage for RamDiffuser {
    fn name(&self) -> &str {
        "ram diffuser"
    }

    fn compress(&self, inlet: &GasState, _spool_fraction: f64) -> GasState {
        GasState {
            pressure_pa: inlet.pressure_pa * self.recovery,
            temperature_k: inlet.temperature_k,
        }
    }
}

/// Rocket propellant feed. The intake is bypassed: chamber pressure follows
/// the throttle directly and propellant arrives at a fixed temperature.
#[derive(Clone, Debug)]
pub struct PropellantFeed {
    /// Chamber pressure at full throttle (Pa)
    pub chamber_pressure_pa: f64,
    /// Feed temperature (K)
    pub feed_temperature_k: f64,
}

impl Default for PropellantFeed {
    fn default() -> Self {
        Self {
            chamber_pressure_pa: ROCKET_CHAMBER_PRESSURE,
            feed_temperature_k: PROPELLANT_FEED_TEMPERATURE,
        }
    }
}

impl CompressionStage for PropellantFeed {
    fn name(&self) -> &str {
        "propellant feed"
    }

    fn compress(&self, _inlet: &GasState, spool_fraction: f64) -> GasState {
        GasState {
            pressure_pa: self.chamber_pressure_pa * spool_fraction,
            temperature_k: self.feed_temperature_k,
        }
    }

    fn breathes_air(&self) -> bool {
        false
    }
}
