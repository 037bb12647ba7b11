//! Intake ram recovery.

use crate::atmosphere::AmbientState;
use crate::common::GasState;
use crate::gas::{ram_pressure_ratio, ram_temperature_ratio};

/// Total conditions at the compressor face (station 2).
///
/// ```text
/// P2 = P0·(1 + 0.2·M²)^3.5
/// T2 = T0·(1 + 0.2·M²)
/// ```
pub fn ram_recovery(ambient: &AmbientState, mach: f64) -> GasState {
    GasState {
        pressure_pa: ambient.pressure_pa * ram_pressure_ratio(mach),
        temperature_k: ambient.temperature_k * ram_temperature_ratio(mach),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::standard_atmosphere;

    #[test]
    fn static_intake_passes_ambient() {
        let amb = standard_atmosphere(0.0);
        let s2 = ram_recovery(&amb, 0.0);
        assert_eq!(s2.pressure_pa, amb.pressure_pa);
        assert_eq!(s2.temperature_k, amb.temperature_k);
    }

    #[test]
    fn ram_rise_at_mach_point_eight() {
        let amb = standard_atmosphere(0.0);
        let s2 = ram_recovery(&amb, 0.8);
        assert!((s2.temperature_k / amb.temperature_k - 1.128).abs() < 1e-12);
        assert!(s2.pressure_pa > 1.5 * amb.pressure_pa);
    }
}
