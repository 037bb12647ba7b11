//! Propelling nozzle.

use crate::common::{GasState, check_efficiency};
use crate::error::ComponentResult;
use crate::gas::{CP_AIR, isentropic_expansion_temperature};
use tc_core::numeric::{TINY, safe_sqrt};

/// Nozzle exit conditions and jet velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NozzleExit {
    /// Station 8, fully expanded to ambient pressure
    pub exit: GasState,
    /// Jet velocity (m/s)
    pub velocity_m_s: f64,
}

/// Convergent nozzle expanding to ambient pressure.
///
/// ```text
/// T8s = T_in·(P0/P_in)^((γ-1)/γ), bounded to [T0, T_in]
/// v   = sqrt(2·cp·(T_in - T8)·eta) / area_scale
/// ```
#[derive(Clone, Debug)]
pub struct Nozzle {
    pub eta: f64,
}

impl Nozzle {
    pub fn new(eta: f64) -> ComponentResult<Self> {
        Ok(Self {
            eta: check_efficiency(eta, "nozzle efficiency")?,
        })
    }

    /// Expand `inlet` to `ambient`. `area_scale` divides the jet velocity; a
    /// non-positive scale closes the throat.
    pub fn expand(&self, inlet: &GasState, ambient: &GasState, area_scale: f64) -> NozzleExit {
        let t_in = inlet.temperature_k;
        let t_ideal = isentropic_expansion_temperature(t_in, inlet.pressure_pa, ambient.pressure_pa);
        // Upper bound first: a starved inlet colder than ambient ends at ambient
        let t_exit = t_ideal.min(t_in).max(ambient.temperature_k);

        let jet = safe_sqrt(2.0 * CP_AIR * (t_in - t_exit) * self.eta);
        let velocity_m_s = if area_scale > TINY { jet / area_scale } else { 0.0 };

        NozzleExit {
            exit: GasState {
                pressure_pa: ambient.pressure_pa,
                temperature_k: t_exit,
            },
            velocity_m_s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ambient() -> GasState {
        GasState::new(101_325.0, 288.15)
    }

    #[test]
    fn expansion_produces_jet() {
        let n = Nozzle::new(0.95).unwrap();
        let out = n.expand(&GasState::new(4.0e5, 1100.0), &ambient(), 1.0);
        assert!(out.velocity_m_s > 500.0);
        assert!(out.exit.temperature_k < 1100.0);
        assert!(out.exit.temperature_k >= 288.15);
        assert_eq!(out.exit.pressure_pa, 101_325.0);
    }

    #[test]
    fn subambient_inlet_gives_no_jet() {
        let n = Nozzle::new(0.95).unwrap();
        let out = n.expand(&GasState::new(0.9e5, 700.0), &ambient(), 1.0);
        assert_eq!(out.velocity_m_s, 0.0);
        assert_eq!(out.exit.temperature_k, 700.0);
    }

    #[test]
    fn cold_inlet_never_below_ambient() {
        let n = Nozzle::new(0.95).unwrap();
        let out = n.expand(&GasState::new(3.0e5, 250.0), &ambient(), 1.0);
        assert_eq!(out.exit.temperature_k, 288.15);
        assert_eq!(out.velocity_m_s, 0.0);
    }

    #[test]
    fn area_scale_divides_velocity() {
        let n = Nozzle::new(0.95).unwrap();
        let inlet = GasState::new(4.0e5, 1100.0);
        let base = n.expand(&inlet, &ambient(), 1.0);
        let restricted = n.expand(&inlet, &ambient(), 2.0);
        assert!((restricted.velocity_m_s - base.velocity_m_s / 2.0).abs() < 1e-9);
        assert_eq!(n.expand(&inlet, &ambient(), 0.0).velocity_m_s, 0.0);
    }
}
