//! Fixed engine design parameters.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use tc_components::common::check_efficiency;
use tc_core::numeric::{ensure_finite, ensure_in_range};

/// Engine architecture. Selects the compression stage the cycle uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineType {
    /// Shaft-driven compressor and turbine; a turbofan when `bypass_ratio > 0`.
    #[default]
    Turbojet,
    /// Ram compression only.
    Ramjet,
    /// Pressure-fed chamber, no intake.
    Rocket,
}

impl EngineType {
    pub fn label(&self) -> &'static str {
        match self {
            EngineType::Turbojet => "turbojet",
            EngineType::Ramjet => "ramjet",
            EngineType::Rocket => "rocket",
        }
    }
}

/// Component efficiencies, each on (0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Efficiencies {
    pub compressor: f64,
    /// Validated and persisted. The turbine pressure drop follows the exit
    /// temperature ratio alone, so the cycle does not read it.
    pub turbine: f64,
    pub combustor: f64,
    pub nozzle: f64,
}

impl Default for Efficiencies {
    fn default() -> Self {
        Self {
            compressor: 0.85,
            turbine: 0.90,
            combustor: 0.98,
            nozzle: 0.95,
        }
    }
}

impl Efficiencies {
    pub fn validate(&self) -> SimResult<()> {
        check_efficiency(self.compressor, "compressor efficiency")?;
        check_efficiency(self.turbine, "turbine efficiency")?;
        check_efficiency(self.combustor, "combustor efficiency")?;
        check_efficiency(self.nozzle, "nozzle efficiency")?;
        Ok(())
    }
}

/// Engine design. Every field is explicit; `Default` is the turbojet preset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Design {
    pub engine_type: EngineType,
    /// Sea-level-static total mass flow at 100% spool (kg/s)
    pub mass_flow_kg_s: f64,
    /// Core compressor pressure ratio at 100% spool
    pub pressure_ratio: f64,
    /// Turbine-inlet temperature limit (K). Only flags over-temperature.
    pub turbine_inlet_temp_limit_k: f64,
    pub efficiencies: Efficiencies,
    /// Bypass to core flow ratio, 0 for a turbojet
    pub bypass_ratio: f64,
    /// Fan pressure ratio at 100% spool, used when `bypass_ratio > 0`
    pub fan_pressure_ratio: f64,
    /// Spool speed held by the governor with ignition on (%)
    pub idle_rpm_pct: f64,
    /// Spool ramp rate (% per second)
    pub spool_ramp_rate_pct_per_s: f64,
}

impl Default for Design {
    fn default() -> Self {
        Self::turbojet()
    }
}

impl Design {
    pub fn turbojet() -> Self {
        Self {
            engine_type: EngineType::Turbojet,
            mass_flow_kg_s: 20.0,
            pressure_ratio: 12.0,
            turbine_inlet_temp_limit_k: 1600.0,
            efficiencies: Efficiencies::default(),
            bypass_ratio: 0.0,
            fan_pressure_ratio: 1.0,
            idle_rpm_pct: 60.0,
            spool_ramp_rate_pct_per_s: 20.0,
        }
    }

    pub fn turbofan() -> Self {
        Self {
            mass_flow_kg_s: 100.0,
            bypass_ratio: 5.0,
            fan_pressure_ratio: 1.6,
            spool_ramp_rate_pct_per_s: 12.0,
            ..Self::turbojet()
        }
    }

    pub fn ramjet() -> Self {
        Self {
            engine_type: EngineType::Ramjet,
            mass_flow_kg_s: 20.0,
            pressure_ratio: 1.0,
            turbine_inlet_temp_limit_k: 2200.0,
            idle_rpm_pct: 0.0,
            spool_ramp_rate_pct_per_s: 50.0,
            ..Self::turbojet()
        }
    }

    pub fn rocket() -> Self {
        Self {
            engine_type: EngineType::Rocket,
            mass_flow_kg_s: 20.0,
            pressure_ratio: 1.0,
            turbine_inlet_temp_limit_k: 3500.0,
            idle_rpm_pct: 0.0,
            spool_ramp_rate_pct_per_s: 100.0,
            ..Self::turbojet()
        }
    }

    /// Named presets, in display order.
    pub fn presets() -> [(&'static str, Design); 4] {
        [
            ("turbojet", Self::turbojet()),
            ("turbofan", Self::turbofan()),
            ("ramjet", Self::ramjet()),
            ("rocket", Self::rocket()),
        ]
    }

    pub fn is_turbofan(&self) -> bool {
        self.engine_type == EngineType::Turbojet && self.bypass_ratio > 0.0
    }

    /// Validate the design.
    ///
    /// # Errors
    /// Returns error if any parameter is non-finite or out of physical bounds.
    pub fn validate(&self) -> SimResult<()> {
        for (value, what) in [
            (self.mass_flow_kg_s, "mass flow"),
            (self.pressure_ratio, "pressure ratio"),
            (self.turbine_inlet_temp_limit_k, "turbine inlet temperature limit"),
            (self.bypass_ratio, "bypass ratio"),
            (self.fan_pressure_ratio, "fan pressure ratio"),
            (self.idle_rpm_pct, "idle rpm"),
            (self.spool_ramp_rate_pct_per_s, "spool ramp rate"),
        ] {
            ensure_finite(value, what)?;
        }

        if self.mass_flow_kg_s <= 0.0 {
            return Err(SimError::InvalidDesign {
                what: "mass flow must be positive",
            });
        }
        if self.pressure_ratio < 1.0 {
            return Err(SimError::InvalidDesign {
                what: "pressure ratio must be at least 1",
            });
        }
        if self.turbine_inlet_temp_limit_k <= 0.0 {
            return Err(SimError::InvalidDesign {
                what: "turbine inlet temperature limit must be positive",
            });
        }
        if self.bypass_ratio < 0.0 {
            return Err(SimError::InvalidDesign {
                what: "bypass ratio cannot be negative",
            });
        }
        if self.bypass_ratio > 0.0 && self.engine_type != EngineType::Turbojet {
            return Err(SimError::InvalidDesign {
                what: "bypass flow requires a turbomachinery engine",
            });
        }
        if self.fan_pressure_ratio < 1.0 {
            return Err(SimError::InvalidDesign {
                what: "fan pressure ratio must be at least 1",
            });
        }
        ensure_in_range(self.idle_rpm_pct, 0.0, 100.0, "idle rpm")?;
        if self.spool_ramp_rate_pct_per_s <= 0.0 {
            return Err(SimError::InvalidDesign {
                what: "spool ramp rate must be positive",
            });
        }

        self.efficiencies.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        for (name, design) in Design::presets() {
            assert!(design.validate().is_ok(), "preset {name} should validate");
        }
    }

    #[test]
    fn default_is_turbojet() {
        let d = Design::default();
        assert_eq!(d.engine_type, EngineType::Turbojet);
        assert_eq!(d.bypass_ratio, 0.0);
        assert!(!d.is_turbofan());
        assert!(Design::turbofan().is_turbofan());
    }

    #[test]
    fn rejects_nonpositive_mass_flow() {
        let d = Design {
            mass_flow_kg_s: 0.0,
            ..Design::turbojet()
        };
        assert!(matches!(d.validate(), Err(SimError::InvalidDesign { .. })));
    }

    #[test]
    fn rejects_bypass_on_ramjet() {
        let d = Design {
            bypass_ratio: 2.0,
            ..Design::ramjet()
        };
        assert!(d.validate().is_err());
    }

    #[test]
    fn rejects_bad_efficiency() {
        let mut d = Design::turbojet();
        d.efficiencies.turbine = 1.5;
        assert!(matches!(d.validate(), Err(SimError::Component { .. })));
    }

    #[test]
    fn rejects_nan() {
        let d = Design {
            pressure_ratio: f64::NAN,
            ..Design::turbojet()
        };
        assert!(d.validate().is_err());
    }

    #[test]
    fn engine_type_serde_is_snake_case() {
        let json = serde_json::to_string(&EngineType::Ramjet).unwrap();
        assert_eq!(json, "\"ramjet\"");
    }

    #[test]
    fn idle_outside_percent_range_rejected() {
        let d = Design {
            idle_rpm_pct: 120.0,
            ..Design::turbojet()
        };
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("idle rpm"), "{err}");
    }
}
