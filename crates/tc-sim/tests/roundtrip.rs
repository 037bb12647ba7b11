//! Integration test: persisted inputs and design replay to identical results.

use tc_sim::{Design, EngineModel, EngineSnapshot, InputPatch, Inputs};

fn replay(design: Design, inputs: Inputs, frames: &[(f64, Option<f64>)]) -> Vec<EngineSnapshot> {
    let mut model = EngineModel::with_inputs(design, inputs).unwrap();
    frames
        .iter()
        .map(|&(dt, throttle)| {
            if let Some(pct) = throttle {
                model.set_inputs(&InputPatch::throttle(pct));
            }
            model.update(dt);
            model.snapshot()
        })
        .collect()
}

fn frames() -> Vec<(f64, Option<f64>)> {
    let mut out = Vec::new();
    for i in 0..400 {
        let dt = [0.016, 0.02, 0.033, 0.4][i % 4];
        let throttle = match i {
            0 => Some(90.0),
            150 => Some(30.0),
            260 => Some(100.0),
            _ => None,
        };
        out.push((dt, throttle));
    }
    out
}

#[test]
fn serialized_configuration_replays_identically() {
    let design = Design::turbofan();
    let inputs = Inputs {
        mach: 0.6,
        altitude_ft: 18_000.0,
        air_fuel_ratio: 45.0,
        ..Inputs::default()
    };

    let design_json = serde_json::to_string(&design).unwrap();
    let inputs_json = serde_json::to_string(&inputs).unwrap();
    let design_back: Design = serde_json::from_str(&design_json).unwrap();
    let inputs_back: Inputs = serde_json::from_str(&inputs_json).unwrap();
    assert_eq!(design_back, design);

    let a = replay(design, inputs, &frames());
    let b = replay(design_back, inputs_back, &frames());
    assert_eq!(a, b);
    assert!(a.last().unwrap().state.running);
}

#[test]
fn snapshot_survives_serialization() {
    let snaps = replay(Design::turbojet(), Inputs::default(), &frames()[..50]);
    let last = snaps.last().unwrap();
    let json = serde_json::to_string(last).unwrap();
    let back: EngineSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, last);
}

#[test]
fn partial_documents_fill_defaults() {
    let design: Design = serde_json::from_str(r#"{"engine_type":"ramjet","pressure_ratio":1.0}"#).unwrap();
    assert_eq!(design.mass_flow_kg_s, Design::default().mass_flow_kg_s);
    assert!(EngineModel::new(design).is_ok());

    let inputs: Inputs = serde_json::from_str(r#"{"throttle_pct":40.0}"#).unwrap();
    assert_eq!(inputs.throttle_pct, 40.0);
    assert_eq!(inputs.air_fuel_ratio, Inputs::default().air_fuel_ratio);
}
