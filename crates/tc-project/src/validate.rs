//! Project validation logic.

use crate::schema::{Project, ScenarioDef};
use std::collections::HashSet;
use tc_sim::Inputs;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid design: {reason}")]
    InvalidDesign { reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    project
        .design
        .validate()
        .map_err(|e| ValidationError::InvalidDesign {
            reason: e.to_string(),
        })?;

    validate_inputs(&project.inputs)?;

    let mut scenario_ids = HashSet::new();
    for scenario in &project.scenarios {
        if !scenario_ids.insert(&scenario.id) {
            return Err(ValidationError::DuplicateId {
                id: scenario.id.clone(),
                context: "scenarios".to_string(),
            });
        }
        validate_scenario(scenario)?;
    }

    Ok(())
}

// The engine accepts any inputs, but a file holding NaN or infinity is corrupt.
fn validate_inputs(inputs: &Inputs) -> Result<(), ValidationError> {
    for (field, value) in [
        ("inputs.throttle_pct", inputs.throttle_pct),
        ("inputs.mach", inputs.mach),
        ("inputs.altitude_ft", inputs.altitude_ft),
        ("inputs.ambient_temperature_k", inputs.ambient_temperature_k),
        ("inputs.ambient_pressure_pa", inputs.ambient_pressure_pa),
        ("inputs.ambient_density_kg_m3", inputs.ambient_density_kg_m3),
        (
            "inputs.fuel_calorific_value_j_per_kg",
            inputs.fuel_calorific_value_j_per_kg,
        ),
        ("inputs.air_fuel_ratio", inputs.air_fuel_ratio),
        ("inputs.injection_pressure_pa", inputs.injection_pressure_pa),
        ("inputs.chamber_volume_m3", inputs.chamber_volume_m3),
        ("inputs.nozzle_area_scale", inputs.nozzle_area_scale),
        ("inputs.diffuser_loss_scale", inputs.diffuser_loss_scale),
    ] {
        if !value.is_finite() {
            return Err(invalid(field, value, "must be finite"));
        }
    }
    Ok(())
}

fn validate_scenario(scenario: &ScenarioDef) -> Result<(), ValidationError> {
    let ctx = |field: &str| format!("scenario {}.{}", scenario.id, field);

    if !scenario.dt_s.is_finite() || scenario.dt_s <= 0.0 {
        return Err(invalid(ctx("dt_s"), scenario.dt_s, "must be positive"));
    }
    if !scenario.t_end_s.is_finite() || scenario.t_end_s < 0.0 {
        return Err(invalid(
            ctx("t_end_s"),
            scenario.t_end_s,
            "must be non-negative",
        ));
    }
    if scenario.record_every == 0 {
        return Err(invalid(
            ctx("record_every"),
            scenario.record_every,
            "must be at least 1",
        ));
    }

    let mut prev_time = 0.0;
    for (idx, event) in scenario.events.iter().enumerate() {
        let field = ctx(&format!("events[{}]", idx));
        if !event.time_s.is_finite() || event.time_s < 0.0 || event.time_s > scenario.t_end_s {
            return Err(invalid(
                format!("{}.time_s", field),
                event.time_s,
                "must lie within the scenario",
            ));
        }
        if event.time_s < prev_time {
            return Err(invalid(
                format!("{}.time_s", field),
                event.time_s,
                "events must be in time order",
            ));
        }
        prev_time = event.time_s;

        for (name, value) in event.action.values() {
            if !value.is_finite() {
                return Err(invalid(format!("{}.{}", field, name), value, "must be finite"));
            }
        }
    }

    Ok(())
}
