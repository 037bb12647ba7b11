//! Operator inputs.

use serde::{Deserialize, Serialize};
use tc_components::FuelCharge;
use tc_components::atmosphere::{SEA_LEVEL_PRESSURE, SEA_LEVEL_TEMPERATURE};

/// Operator-settable inputs, persisted across ticks.
///
/// Nothing here is validated; out-of-range values are the caller's business
/// and the solver only guarantees it will not fault on finite numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inputs {
    /// Throttle (%), nominally 0..=100
    pub throttle_pct: f64,
    pub mach: f64,
    pub altitude_ft: f64,
    /// Use the ambient fields below instead of the standard atmosphere
    pub manual_atmosphere: bool,
    /// Ambient temperature (K). Manual override; overwritten every tick in
    /// automatic mode.
    pub ambient_temperature_k: f64,
    /// Ambient pressure (Pa). Manual override; overwritten every tick in
    /// automatic mode.
    pub ambient_pressure_pa: f64,
    /// Ambient density (kg/m³). Always derived from temperature and pressure.
    pub ambient_density_kg_m3: f64,
    /// Fuel lower heating value (J/kg)
    pub fuel_calorific_value_j_per_kg: f64,
    /// Overall air-fuel ratio
    pub air_fuel_ratio: f64,
    /// Injector pressure (Pa). Carried for display, not read by the cycle.
    pub injection_pressure_pa: f64,
    /// Combustion chamber volume (m³). Carried for display, not read by the cycle.
    pub chamber_volume_m3: f64,
    /// Divides the core jet velocity
    pub nozzle_area_scale: f64,
    /// Multiplies the combustor total-pressure retention
    pub diffuser_loss_scale: f64,
    /// Ignition on: the governor holds at least idle speed
    pub ignition: bool,
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            throttle_pct: 0.0,
            mach: 0.0,
            altitude_ft: 0.0,
            manual_atmosphere: false,
            ambient_temperature_k: SEA_LEVEL_TEMPERATURE,
            ambient_pressure_pa: SEA_LEVEL_PRESSURE,
            ambient_density_kg_m3: 1.225,
            fuel_calorific_value_j_per_kg: 43.0e6,
            air_fuel_ratio: 50.0,
            injection_pressure_pa: 3.0e5,
            chamber_volume_m3: 0.01,
            nozzle_area_scale: 1.0,
            diffuser_loss_scale: 1.0,
            ignition: false,
        }
    }
}

impl Inputs {
    pub fn fuel(&self) -> FuelCharge {
        FuelCharge {
            calorific_value_j_per_kg: self.fuel_calorific_value_j_per_kg,
            air_fuel_ratio: self.air_fuel_ratio,
        }
    }
}

/// Partial update of [`Inputs`]; `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throttle_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mach: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude_ft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_atmosphere: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambient_temperature_k: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambient_pressure_pa: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_calorific_value_j_per_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_fuel_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injection_pressure_pa: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chamber_volume_m3: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nozzle_area_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diffuser_loss_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignition: Option<bool>,
}

impl InputPatch {
    pub fn throttle(pct: f64) -> Self {
        Self {
            throttle_pct: Some(pct),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite the fields this patch carries.
    pub fn apply(&self, inputs: &mut Inputs) {
        if let Some(v) = self.throttle_pct {
            inputs.throttle_pct = v;
        }
        if let Some(v) = self.mach {
            inputs.mach = v;
        }
        if let Some(v) = self.altitude_ft {
            inputs.altitude_ft = v;
        }
        if let Some(v) = self.manual_atmosphere {
            inputs.manual_atmosphere = v;
        }
        if let Some(v) = self.ambient_temperature_k {
            inputs.ambient_temperature_k = v;
        }
        if let Some(v) = self.ambient_pressure_pa {
            inputs.ambient_pressure_pa = v;
        }
        if let Some(v) = self.fuel_calorific_value_j_per_kg {
            inputs.fuel_calorific_value_j_per_kg = v;
        }
        if let Some(v) = self.air_fuel_ratio {
            inputs.air_fuel_ratio = v;
        }
        if let Some(v) = self.injection_pressure_pa {
            inputs.injection_pressure_pa = v;
        }
        if let Some(v) = self.chamber_volume_m3 {
            inputs.chamber_volume_m3 = v;
        }
        if let Some(v) = self.nozzle_area_scale {
            inputs.nozzle_area_scale = v;
        }
        if let Some(v) = self.diffuser_loss_scale {
            inputs.diffuser_loss_scale = v;
        }
        if let Some(v) = self.ignition {
            inputs.ignition = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_changes_nothing() {
        let mut inputs = Inputs::default();
        let patch = InputPatch::default();
        assert!(patch.is_empty());
        patch.apply(&mut inputs);
        assert_eq!(inputs, Inputs::default());
    }

    #[test]
    fn patch_sets_only_given_fields() {
        let mut inputs = Inputs::default();
        let patch = InputPatch {
            throttle_pct: Some(85.0),
            altitude_ft: Some(30_000.0),
            ignition: Some(true),
            ..InputPatch::default()
        };
        patch.apply(&mut inputs);
        assert_eq!(inputs.throttle_pct, 85.0);
        assert_eq!(inputs.altitude_ft, 30_000.0);
        assert!(inputs.ignition);
        assert_eq!(inputs.mach, 0.0);
        assert_eq!(inputs.air_fuel_ratio, 50.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let inputs: Inputs = serde_json::from_str(r#"{"throttle_pct": 40.0}"#).unwrap();
        assert_eq!(inputs.throttle_pct, 40.0);
        assert_eq!(inputs.fuel_calorific_value_j_per_kg, 43.0e6);
    }
}
