//! Ambient conditions: standard troposphere or manual override.

use crate::gas::ideal_gas_density;
use serde::{Deserialize, Serialize};
use tc_core::numeric::safe_powf;
use tc_core::units::constants::feet_to_meters;
use tc_core::units::{Density, Pressure, Temperature, k, kgpm3, pa};

/// Sea-level standard temperature (K)
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15;
/// Sea-level standard pressure (Pa)
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0;
/// Tropospheric lapse rate (K/m)
pub const LAPSE_RATE: f64 = 0.0065;
/// Temperature floor at the tropopause (K)
pub const TROPOPAUSE_TEMPERATURE: f64 = 216.65;

const BAROMETRIC_COEFF: f64 = 0.000_022_557_7;
const BAROMETRIC_EXPONENT: f64 = 5.2559;

/// Ambient static conditions at station 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmbientState {
    /// Temperature (K)
    pub temperature_k: f64,
    /// Pressure (Pa)
    pub pressure_pa: f64,
    /// Density (kg/m³)
    pub density_kg_m3: f64,
}

impl AmbientState {
    pub fn temperature(&self) -> Temperature {
        k(self.temperature_k)
    }

    pub fn pressure(&self) -> Pressure {
        pa(self.pressure_pa)
    }

    pub fn density(&self) -> Density {
        kgpm3(self.density_kg_m3)
    }
}

impl Default for AmbientState {
    fn default() -> Self {
        standard_atmosphere(0.0)
    }
}

/// Standard troposphere at a geometric altitude in meters.
///
/// ```text
/// T = max(288.15 - 0.0065·h, 216.65)
/// P = 101325 · (1 - 0.0000225577·h)^5.2559
/// ```
///
/// The temperature floor holds above the tropopause while the pressure keeps
/// following the tropospheric formula. Above ~44 km the base would go negative;
/// pressure is floored at zero there.
pub fn standard_atmosphere(altitude_m: f64) -> AmbientState {
    let temperature_k = (SEA_LEVEL_TEMPERATURE - LAPSE_RATE * altitude_m).max(TROPOPAUSE_TEMPERATURE);
    let pressure_pa =
        SEA_LEVEL_PRESSURE * safe_powf(1.0 - BAROMETRIC_COEFF * altitude_m, BAROMETRIC_EXPONENT);

    AmbientState {
        temperature_k,
        pressure_pa,
        density_kg_m3: ideal_gas_density(pressure_pa, temperature_k),
    }
}

/// Resolve ambient conditions for a tick.
///
/// With `manual` set, the given temperature and pressure pass through
/// unchanged and altitude is ignored; density always follows the ideal-gas
/// relation.
pub fn resolve_ambient(
    altitude_ft: f64,
    manual: bool,
    manual_temperature_k: f64,
    manual_pressure_pa: f64,
) -> AmbientState {
    if manual {
        AmbientState {
            temperature_k: manual_temperature_k,
            pressure_pa: manual_pressure_pa,
            density_kg_m3: ideal_gas_density(manual_pressure_pa, manual_temperature_k),
        }
    } else {
        standard_atmosphere(feet_to_meters(altitude_ft))
    }
}
