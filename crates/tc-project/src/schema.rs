//! Project schema definitions.

use serde::{Deserialize, Serialize};
use tc_sim::{
    Design, EngineModel, InputPatch, Inputs, Schedule, ScheduledPatch, SimOptions, SimResult,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub design: Design,
    /// Initial inputs for every scenario.
    #[serde(default)]
    pub inputs: Inputs,
    #[serde(default)]
    pub scenarios: Vec<ScenarioDef>,
}

impl Project {
    pub fn scenario(&self, id: &str) -> Option<&ScenarioDef> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// A fresh, stopped engine built from the project design and inputs.
    pub fn build_model(&self) -> SimResult<EngineModel> {
        EngineModel::with_inputs(self.design.clone(), self.inputs.clone())
    }
}

fn default_dt_s() -> f64 {
    SimOptions::default().dt
}

fn default_record_every() -> usize {
    SimOptions::default().record_every
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioDef {
    pub id: String,
    pub name: String,
    #[serde(default = "default_dt_s")]
    pub dt_s: f64,
    pub t_end_s: f64,
    #[serde(default = "default_record_every")]
    pub record_every: usize,
    #[serde(default)]
    pub events: Vec<EventDef>,
}

impl ScenarioDef {
    pub fn options(&self) -> SimOptions {
        SimOptions {
            dt: self.dt_s,
            t_end: self.t_end_s,
            record_every: self.record_every,
            ..SimOptions::default()
        }
    }

    pub fn schedule(&self) -> Schedule {
        Schedule::new(
            self.events
                .iter()
                .map(|e| ScheduledPatch {
                    time_s: e.time_s,
                    patch: e.action.to_patch(),
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDef {
    pub time_s: f64,
    pub action: ActionDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ActionDef {
    SetThrottle {
        pct: f64,
    },
    SetMach {
        mach: f64,
    },
    SetAltitude {
        altitude_ft: f64,
    },
    SetIgnition {
        on: bool,
    },
    SetManualAtmosphere {
        enabled: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        temperature_k: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pressure_pa: Option<f64>,
    },
    SetFuel {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        calorific_value_j_per_kg: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        air_fuel_ratio: Option<f64>,
    },
    SetNozzleAreaScale {
        scale: f64,
    },
    SetDiffuserLossScale {
        scale: f64,
    },
}

impl ActionDef {
    pub fn to_patch(&self) -> InputPatch {
        match *self {
            ActionDef::SetThrottle { pct } => InputPatch::throttle(pct),
            ActionDef::SetMach { mach } => InputPatch {
                mach: Some(mach),
                ..InputPatch::default()
            },
            ActionDef::SetAltitude { altitude_ft } => InputPatch {
                altitude_ft: Some(altitude_ft),
                ..InputPatch::default()
            },
            ActionDef::SetIgnition { on } => InputPatch {
                ignition: Some(on),
                ..InputPatch::default()
            },
            ActionDef::SetManualAtmosphere {
                enabled,
                temperature_k,
                pressure_pa,
            } => InputPatch {
                manual_atmosphere: Some(enabled),
                ambient_temperature_k: temperature_k,
                ambient_pressure_pa: pressure_pa,
                ..InputPatch::default()
            },
            ActionDef::SetFuel {
                calorific_value_j_per_kg,
                air_fuel_ratio,
            } => InputPatch {
                fuel_calorific_value_j_per_kg: calorific_value_j_per_kg,
                air_fuel_ratio,
                ..InputPatch::default()
            },
            ActionDef::SetNozzleAreaScale { scale } => InputPatch {
                nozzle_area_scale: Some(scale),
                ..InputPatch::default()
            },
            ActionDef::SetDiffuserLossScale { scale } => InputPatch {
                diffuser_loss_scale: Some(scale),
                ..InputPatch::default()
            },
        }
    }

    /// Numeric values carried by the action, with their field names.
    pub fn values(&self) -> Vec<(&'static str, f64)> {
        match *self {
            ActionDef::SetThrottle { pct } => vec![("pct", pct)],
            ActionDef::SetMach { mach } => vec![("mach", mach)],
            ActionDef::SetAltitude { altitude_ft } => vec![("altitude_ft", altitude_ft)],
            ActionDef::SetIgnition { .. } => Vec::new(),
            ActionDef::SetManualAtmosphere {
                temperature_k,
                pressure_pa,
                ..
            } => [("temperature_k", temperature_k), ("pressure_pa", pressure_pa)]
                .into_iter()
                .filter_map(|(name, v)| v.map(|v| (name, v)))
                .collect(),
            ActionDef::SetFuel {
                calorific_value_j_per_kg,
                air_fuel_ratio,
            } => [
                ("calorific_value_j_per_kg", calorific_value_j_per_kg),
                ("air_fuel_ratio", air_fuel_ratio),
            ]
            .into_iter()
            .filter_map(|(name, v)| v.map(|v| (name, v)))
            .collect(),
            ActionDef::SetNozzleAreaScale { scale } | ActionDef::SetDiffuserLossScale { scale } => {
                vec![("scale", scale)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_atmosphere_action_patches_only_given_fields() {
        let patch = ActionDef::SetManualAtmosphere {
            enabled: true,
            temperature_k: Some(250.0),
            pressure_pa: None,
        }
        .to_patch();
        assert_eq!(patch.manual_atmosphere, Some(true));
        assert_eq!(patch.ambient_temperature_k, Some(250.0));
        assert_eq!(patch.ambient_pressure_pa, None);
        assert_eq!(patch.throttle_pct, None);
    }

    #[test]
    fn scenario_options_keep_defaults_for_limits() {
        let scenario = ScenarioDef {
            id: "s".to_string(),
            name: "S".to_string(),
            dt_s: 0.05,
            t_end_s: 3.0,
            record_every: 2,
            events: vec![],
        };
        let opts = scenario.options();
        assert_eq!(opts.dt, 0.05);
        assert_eq!(opts.t_end, 3.0);
        assert_eq!(opts.record_every, 2);
        assert_eq!(opts.max_steps, SimOptions::default().max_steps);
        assert_eq!(opts.step_count(), 60);
    }

    #[test]
    fn actions_use_type_tag() {
        let json = r#"{"time_s":1.5,"action":{"type":"SetFuel","air_fuel_ratio":40.0}}"#;
        let event: EventDef = serde_json::from_str(json).unwrap();
        assert_eq!(
            event.action,
            ActionDef::SetFuel {
                calorific_value_j_per_kg: None,
                air_fuel_ratio: Some(40.0),
            }
        );
        assert_eq!(event.action.values(), vec![("air_fuel_ratio", 40.0)]);
    }
}
