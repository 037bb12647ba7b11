//! Turbine work balance.

use crate::common::GasState;
use crate::gas::{CP_AIR, PRESSURE_EXPONENT};
use tc_core::numeric::{safe_div, safe_powf};

/// Shaft mechanical efficiency between turbine and driven stages
pub const MECHANICAL_EFFICIENCY: f64 = 0.99;

/// Floor on turbine exit temperature (K). Keeps the pressure relation real;
/// it is not a physical limit.
pub const MIN_EXIT_TEMPERATURE: f64 = 1.0;

/// Result of the turbine work balance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurbineExit {
    /// Station 5
    pub exit: GasState,
    /// Total temperature drop across the turbine (K)
    pub temperature_drop_k: f64,
    /// Shaft power delivered, including mechanical losses (W)
    pub shaft_power_w: f64,
}

/// Gas turbine driving the compressor and fan.
///
/// The turbine supplies exactly what the driven stages absorb:
///
/// ```text
/// W_req = W_absorbed / eta_mech
/// ΔT    = W_req / (mdot_core·cp)
/// T5    = T4 - ΔT
/// P5    = P4·(T5/T4)^3.5
/// ```
///
/// `T5` is not clamped at ambient. When the driven stages demand more than the
/// gas can give, `T5` falls below ambient and the caller decides what that
/// means.
#[derive(Clone, Debug)]
pub struct Turbine {
    pub mechanical_efficiency: f64,
}

impl Default for Turbine {
    fn default() -> Self {
        Self {
            mechanical_efficiency: MECHANICAL_EFFICIENCY,
        }
    }
}

impl Turbine {
    pub fn extract(&self, inlet: &GasState, core_mdot_kg_s: f64, absorbed_power_w: f64) -> TurbineExit {
        let shaft_power_w = absorbed_power_w / self.mechanical_efficiency;
        let temperature_drop_k = safe_div(shaft_power_w, core_mdot_kg_s * CP_AIR, 0.0);

        let t4 = inlet.temperature_k;
        let t5 = (t4 - temperature_drop_k).max(MIN_EXIT_TEMPERATURE);
        let p5 = inlet.pressure_pa * safe_powf(safe_div(t5, t4, 1.0), PRESSURE_EXPONENT);

        TurbineExit {
            exit: GasState {
                pressure_pa: p5,
                temperature_k: t5,
            },
            temperature_drop_k,
            shaft_power_w,
        }
    }
}
