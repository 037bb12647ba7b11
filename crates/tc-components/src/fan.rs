//! Bypass fan.

use crate::common::{GasState, check_efficiency, check_finite};
use crate::error::{ComponentError, ComponentResult};
use crate::gas::{CP_AIR, compression_exit_temperature};

/// Fixed fan efficiency, used for both fan compression and bypass expansion
pub const FAN_EFFICIENCY: f64 = 0.9;

/// Fan compressing the bypass stream. Its pressure ratio schedules with spool
/// speed the same way the core compressor does.
#[derive(Clone, Debug)]
pub struct Fan {
    /// Fan pressure ratio at 100% spool
    pub design_pressure_ratio: f64,
    pub eta: f64,
}

impl Fan {
    pub fn new(design_pressure_ratio: f64) -> ComponentResult<Self> {
        check_finite(design_pressure_ratio, "fan pressure ratio")?;
        if design_pressure_ratio < 1.0 {
            return Err(ComponentError::InvalidArg {
                what: "fan pressure ratio must be at least 1",
            });
        }
        Ok(Self {
            design_pressure_ratio,
            eta: check_efficiency(FAN_EFFICIENCY, "fan efficiency")?,
        })
    }

    pub fn pressure_ratio(&self, spool_fraction: f64) -> f64 {
        1.0 + (self.design_pressure_ratio - 1.0) * spool_fraction * spool_fraction
    }

    /// Fan exit conditions of the bypass stream.
    pub fn compress(&self, inlet: &GasState, spool_fraction: f64) -> GasState {
        let fpr = self.pressure_ratio(spool_fraction);
        GasState {
            pressure_pa: inlet.pressure_pa * fpr,
            temperature_k: compression_exit_temperature(inlet.temperature_k, fpr, self.eta),
        }
    }

    /// Work per kg of bypass flow (J/kg).
    pub fn specific_work(&self, inlet: &GasState, exit: &GasState) -> f64 {
        CP_AIR * (exit.temperature_k - inlet.temperature_k)
    }
}
