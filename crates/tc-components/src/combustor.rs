//! Combustor heat release.

use crate::common::{GasState, check_efficiency};
use crate::error::ComponentResult;
use crate::gas::CP_AIR;
use serde::{Deserialize, Serialize};

/// Smallest air-fuel ratio the heat release divides by
pub const MIN_AIR_FUEL_RATIO: f64 = 1e-6;

/// Fuel properties and mixture setting for a tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelCharge {
    /// Lower heating value (J/kg)
    pub calorific_value_j_per_kg: f64,
    /// Overall air-fuel ratio (kg air / kg fuel)
    pub air_fuel_ratio: f64,
}

/// Result of burning one tick's core flow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CombustorExit {
    /// Station 4
    pub exit: GasState,
    /// Fuel mass flow (kg/s)
    pub fuel_flow_kg_s: f64,
    /// Heat added per kg of core air (J/kg)
    pub heat_release_j_per_kg: f64,
}

/// Fraction of the ideal heat release realised at a spool fraction.
///
/// Grows as `f²` and saturates at 1, standing in for incomplete light-off at
/// low power.
pub fn combustion_intensity(spool_fraction: f64) -> f64 {
    (spool_fraction * spool_fraction).clamp(0.0, 1.0)
}

/// Constant-pressure burner with a lumped total-pressure loss.
///
/// ```text
/// P4 = P3·eta·diffuser_loss_scale
/// q  = LHV/AFR·intensity(f)
/// T4 = T3 + q/cp
/// mdot_fuel = mdot_core/AFR
/// ```
#[derive(Clone, Debug)]
pub struct Combustor {
    /// Combustor efficiency (0 < eta <= 1), applied as a pressure retention
    pub eta: f64,
}

impl Combustor {
    pub fn new(eta: f64) -> ComponentResult<Self> {
        Ok(Self {
            eta: check_efficiency(eta, "combustor efficiency")?,
        })
    }

    pub fn burn(
        &self,
        inlet: &GasState,
        core_mdot_kg_s: f64,
        fuel: &FuelCharge,
        spool_fraction: f64,
        diffuser_loss_scale: f64,
    ) -> CombustorExit {
        let afr = fuel.air_fuel_ratio.max(MIN_AIR_FUEL_RATIO);
        let heat = fuel.calorific_value_j_per_kg / afr * combustion_intensity(spool_fraction);

        CombustorExit {
            exit: GasState {
                pressure_pa: inlet.pressure_pa * self.eta * diffuser_loss_scale,
                temperature_k: inlet.temperature_k + heat / CP_AIR,
            },
            fuel_flow_kg_s: core_mdot_kg_s / afr,
            heat_release_j_per_kg: heat,
        }
    }
}
