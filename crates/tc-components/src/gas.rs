//! Calorically perfect air and the isentropic relations built on it.

use tc_core::numeric::{safe_div, safe_powf};

/// Specific heat at constant pressure, J/(kg·K)
pub const CP_AIR: f64 = 1005.0;
/// Specific gas constant for dry air, J/(kg·K)
pub const R_AIR: f64 = 287.05;
/// Ratio of specific heats
pub const GAMMA: f64 = 1.4;
/// Compression exponent (γ-1)/γ rounded as used by the compressor relation
pub const COMPRESSION_EXPONENT: f64 = 0.286;
/// Expansion exponent (γ-1)/γ
pub const EXPANSION_EXPONENT: f64 = (GAMMA - 1.0) / GAMMA;
/// γ/(γ-1), pressure ratio per temperature ratio
pub const PRESSURE_EXPONENT: f64 = 3.5;
/// Sea-level-static reference density for mass-flow scaling, kg/m³
pub const REFERENCE_DENSITY: f64 = 1.225;
/// Flight speed of sound used to convert Mach to flight velocity, m/s
pub const SPEED_OF_SOUND_FLIGHT: f64 = 340.3;

/// Total-to-static temperature ratio `1 + 0.2·M²`.
#[inline]
pub fn ram_temperature_ratio(mach: f64) -> f64 {
    1.0 + 0.5 * (GAMMA - 1.0) * mach * mach
}

/// Total-to-static pressure ratio `(1 + 0.2·M²)^3.5`.
#[inline]
pub fn ram_pressure_ratio(mach: f64) -> f64 {
    safe_powf(ram_temperature_ratio(mach), PRESSURE_EXPONENT)
}

/// Exit temperature of a real compression through `pressure_ratio`.
///
/// ```text
/// T_out = T_in * (1 + (PR^0.286 - 1) / eta)
/// ```
#[inline]
pub fn compression_exit_temperature(t_in: f64, pressure_ratio: f64, eta: f64) -> f64 {
    let ideal_rise = safe_powf(pressure_ratio, COMPRESSION_EXPONENT) - 1.0;
    t_in * (1.0 + safe_div(ideal_rise, eta, 0.0))
}

/// Isentropic temperature after expanding from `p_in` to `p_out`.
///
/// Returns `t_in` when the inlet pressure is zero.
#[inline]
pub fn isentropic_expansion_temperature(t_in: f64, p_in: f64, p_out: f64) -> f64 {
    let ratio = safe_div(p_out, p_in, 1.0);
    t_in * safe_powf(ratio, EXPANSION_EXPONENT)
}

/// Ideal-gas density `P / (R·T)`, zero for non-positive temperature.
#[inline]
pub fn ideal_gas_density(pressure_pa: f64, temperature_k: f64) -> f64 {
    if temperature_k > 0.0 {
        pressure_pa / (R_AIR * temperature_k)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ram_ratios_at_rest_are_unity() {
        assert_eq!(ram_temperature_ratio(0.0), 1.0);
        assert_eq!(ram_pressure_ratio(0.0), 1.0);
    }

    #[test]
    fn ram_ratios_mach_one() {
        assert!((ram_temperature_ratio(1.0) - 1.2).abs() < 1e-12);
        // 1.2^3.5 ≈ 1.8929
        assert!((ram_pressure_ratio(1.0) - 1.892_929).abs() < 1e-5);
    }

    #[test]
    fn compression_loses_to_efficiency() {
        let ideal = compression_exit_temperature(288.15, 10.0, 1.0);
        let real = compression_exit_temperature(288.15, 10.0, 0.8);
        assert!(real > ideal);
        assert!(ideal > 288.15);
    }

    #[test]
    fn expansion_never_heats() {
        let t = isentropic_expansion_temperature(1000.0, 400_000.0, 100_000.0);
        assert!(t < 1000.0);
        assert_eq!(isentropic_expansion_temperature(1000.0, 0.0, 100_000.0), 1000.0);
    }

    #[test]
    fn sea_level_density() {
        let rho = ideal_gas_density(101_325.0, 288.15);
        assert!((rho - 1.225).abs() < 1e-3);
        assert_eq!(ideal_gas_density(101_325.0, 0.0), 0.0);
    }
}
