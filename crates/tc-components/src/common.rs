//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use serde::{Deserialize, Serialize};
use tc_core::numeric::ensure_finite;
use tc_core::units::{Pressure, Temperature, k, pa};

/// Total pressure and temperature at a point along the gas path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GasState {
    /// Pressure (Pa)
    pub pressure_pa: f64,
    /// Temperature (K)
    pub temperature_k: f64,
}

impl GasState {
    pub fn new(pressure_pa: f64, temperature_k: f64) -> Self {
        Self {
            pressure_pa,
            temperature_k,
        }
    }

    pub fn pressure(&self) -> Pressure {
        pa(self.pressure_pa)
    }

    pub fn temperature(&self) -> Temperature {
        k(self.temperature_k)
    }
}

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Efficiencies are accepted on (0, 1].
pub fn check_efficiency(eta: f64, what: &'static str) -> ComponentResult<f64> {
    check_finite(eta, what)?;
    if eta <= 0.0 || eta > 1.0 {
        return Err(ComponentError::InvalidArg { what });
    }
    Ok(eta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_check_efficiency() {
        assert!(check_efficiency(0.85, "eta").is_ok());
        assert!(check_efficiency(1.0, "eta").is_ok());
        assert!(check_efficiency(0.0, "eta").is_err());
        assert!(check_efficiency(1.01, "eta").is_err());
        assert!(check_efficiency(f64::NAN, "eta").is_err());
    }

    #[test]
    fn gas_state_units() {
        let s = GasState::new(101_325.0, 288.15);
        assert!((s.pressure().value - 101_325.0).abs() < 1e-9);
        assert!((s.temperature().value - 288.15).abs() < 1e-9);
    }
}
