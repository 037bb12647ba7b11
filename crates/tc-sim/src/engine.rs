//! The engine model: one object per simulated engine, updated once per tick.

use crate::cycle::CycleSolver;
use crate::design::Design;
use crate::error::SimResult;
use crate::inputs::{InputPatch, Inputs};
use crate::spool::{advance_spool, governed_target, is_running};
use crate::state::{EngineSnapshot, EngineState, Stations};
use crate::timestep::StepPolicy;
use tc_components::{AmbientState, resolve_ambient};
use tracing::{debug, warn};

/// Simulated engine.
///
/// The model owns its state and station table and is the only writer of
/// either. Readers get shared references or an owned [`EngineSnapshot`].
#[derive(Debug)]
pub struct EngineModel {
    inputs: Inputs,
    design: Design,
    policy: StepPolicy,
    solver: CycleSolver,
    state: EngineState,
    stations: Stations,
}

impl EngineModel {
    /// Create a stopped engine with default inputs.
    ///
    /// # Errors
    /// Returns error if the design fails validation.
    pub fn new(design: Design) -> SimResult<Self> {
        Self::with_inputs(design, Inputs::default())
    }

    /// Create a stopped engine with the given inputs. State starts zeroed and
    /// every station sits at the ambient the inputs resolve to, which is also
    /// written back into the inputs.
    pub fn with_inputs(design: Design, mut inputs: Inputs) -> SimResult<Self> {
        let solver = CycleSolver::from_design(&design)?;
        let ambient = Self::resolve(&inputs);
        write_ambient(&mut inputs, &ambient);
        Ok(Self {
            inputs,
            design,
            policy: StepPolicy::default(),
            solver,
            state: EngineState::default(),
            stations: Stations::ambient(&ambient),
        })
    }

    pub fn with_policy(mut self, policy: StepPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// Direct access for hosts that mutate inputs field by field between ticks.
    pub fn inputs_mut(&mut self) -> &mut Inputs {
        &mut self.inputs
    }

    pub fn set_inputs(&mut self, patch: &InputPatch) {
        patch.apply(&mut self.inputs);
    }

    pub fn design(&self) -> &Design {
        &self.design
    }

    pub fn policy(&self) -> StepPolicy {
        self.policy
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn stations(&self) -> &Stations {
        &self.stations
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            inputs: self.inputs.clone(),
            state: self.state,
            stations: self.stations,
        }
    }

    /// Swap in a new design. Inputs and spool speed carry over; the new
    /// design takes effect on the next `update`.
    ///
    /// # Errors
    /// Returns error if the design fails validation; the old design stays.
    pub fn reconfigure(&mut self, design: Design) -> SimResult<()> {
        let solver = CycleSolver::from_design(&design)?;
        debug!(
            from = self.design.engine_type.label(),
            to = design.engine_type.label(),
            "engine reconfigured"
        );
        self.solver = solver;
        self.design = design;
        Ok(())
    }

    /// Advance the engine by `dt` seconds.
    ///
    /// Moves the spool toward its governed target, resolves ambient
    /// conditions (written back into the inputs), then either solves the cycle
    /// or publishes the cold snapshot. State and stations are replaced
    /// together.
    pub fn update(&mut self, dt: f64) {
        let step = self.policy.frame_dt(dt);
        if step < dt {
            debug!(requested = dt, used = step, "frame dt clamped");
        }

        let target = governed_target(&self.inputs, &self.design);
        let rpm = advance_spool(
            self.state.rpm_pct,
            target,
            self.design.spool_ramp_rate_pct_per_s,
            step,
        );

        let ambient = Self::resolve(&self.inputs);
        write_ambient(&mut self.inputs, &ambient);

        let solution = if is_running(rpm) {
            self.solver.solve(&self.inputs, &ambient, rpm)
        } else {
            self.solver.cold(&ambient, rpm)
        };

        self.log_transitions(&solution.state);
        self.state = solution.state;
        self.stations = solution.stations;
    }

    fn resolve(inputs: &Inputs) -> AmbientState {
        resolve_ambient(
            inputs.altitude_ft,
            inputs.manual_atmosphere,
            inputs.ambient_temperature_k,
            inputs.ambient_pressure_pa,
        )
    }

    fn log_transitions(&self, next: &EngineState) {
        let prev = &self.state;
        if next.running != prev.running {
            debug!(rpm = next.rpm_pct, running = next.running, "spool crossed run threshold");
        }
        if next.turbine_starved && !prev.turbine_starved {
            warn!(
                egt_k = next.egt_k,
                rpm = next.rpm_pct,
                "turbine exit below ambient: driven stages exceed available work"
            );
        }
        if next.over_temperature && !prev.over_temperature {
            warn!(
                t4_k = next.t4_k,
                limit_k = self.design.turbine_inlet_temp_limit_k,
                "combustor exit above turbine inlet limit"
            );
        }
    }
}

fn write_ambient(inputs: &mut Inputs, ambient: &AmbientState) {
    inputs.ambient_temperature_k = ambient.temperature_k;
    inputs.ambient_pressure_pa = ambient.pressure_pa;
    inputs.ambient_density_kg_m3 = ambient.density_kg_m3;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::EngineType;
    use crate::spool::RUN_THRESHOLD_PCT;

    #[test]
    fn starts_zeroed_with_ambient_stations() {
        let model = EngineModel::new(Design::turbojet()).unwrap();
        assert_eq!(*model.state(), EngineState::default());
        for (_, s) in model.stations().iter() {
            assert!((s.temperature_k - 288.15).abs() < 1e-9);
        }
    }

    #[test]
    fn invalid_design_rejected() {
        let design = Design {
            mass_flow_kg_s: -1.0,
            ..Design::turbojet()
        };
        assert!(EngineModel::new(design).is_err());
    }

    #[test]
    fn set_inputs_patches_fields() {
        let mut model = EngineModel::new(Design::turbojet()).unwrap();
        model.set_inputs(&InputPatch::throttle(75.0));
        assert_eq!(model.inputs().throttle_pct, 75.0);
        model.inputs_mut().mach = 0.3;
        assert_eq!(model.inputs().mach, 0.3);
    }

    #[test]
    fn large_frame_is_clamped() {
        let mut model = EngineModel::new(Design::turbojet()).unwrap();
        model.set_inputs(&InputPatch::throttle(100.0));
        model.update(10.0);
        let expected = model.design().spool_ramp_rate_pct_per_s * model.policy().max_frame_dt_s;
        assert!((model.state().rpm_pct - expected).abs() < 1e-9);
    }

    #[test]
    fn unclamped_policy_follows_host() {
        let mut model = EngineModel::new(Design::turbojet())
            .unwrap()
            .with_policy(StepPolicy::unclamped());
        model.set_inputs(&InputPatch::throttle(100.0));
        model.update(10.0);
        assert_eq!(model.state().rpm_pct, 100.0);
        assert!(model.state().running);
    }

    #[test]
    fn ambient_written_back_in_auto_mode() {
        let mut model = EngineModel::new(Design::turbojet()).unwrap();
        model.inputs_mut().altitude_ft = 30_000.0;
        model.update(0.02);
        assert!((model.inputs().ambient_temperature_k - 228.714).abs() < 1e-3);
        assert!(model.inputs().ambient_pressure_pa < 31_000.0);
        assert!(model.inputs().ambient_density_kg_m3 < 0.5);
    }

    #[test]
    fn construction_writes_ambient_back() {
        let inputs = Inputs {
            altitude_ft: 30_000.0,
            ..Inputs::default()
        };
        let model = EngineModel::with_inputs(Design::turbojet(), inputs).unwrap();
        let s0 = model.stations()[crate::state::StationId::Ambient];
        assert_eq!(model.inputs().ambient_temperature_k, s0.temperature_k);
        assert_eq!(model.inputs().ambient_pressure_pa, s0.pressure_pa);
        assert!((s0.temperature_k - 228.714).abs() < 1e-3);
        assert!(model.inputs().ambient_density_kg_m3 < 0.5);
    }

    #[test]
    fn reconfigure_keeps_spool() {
        let mut model = EngineModel::new(Design::turbojet())
            .unwrap()
            .with_policy(StepPolicy::unclamped());
        model.set_inputs(&InputPatch::throttle(50.0));
        model.update(10.0);
        let rpm = model.state().rpm_pct;

        model.reconfigure(Design::rocket()).unwrap();
        assert_eq!(model.design().engine_type, EngineType::Rocket);
        model.update(0.0);
        assert_eq!(model.state().rpm_pct, rpm);
        assert!((model.state().p3_pa - 1.5e6).abs() < 1e-6);
    }

    #[test]
    fn failed_reconfigure_keeps_old_design() {
        let mut model = EngineModel::new(Design::turbojet()).unwrap();
        let bad = Design {
            spool_ramp_rate_pct_per_s: 0.0,
            ..Design::turbofan()
        };
        assert!(model.reconfigure(bad).is_err());
        assert_eq!(*model.design(), Design::turbojet());
    }

    #[test]
    fn stays_cold_below_threshold() {
        let mut model = EngineModel::new(Design::turbojet()).unwrap();
        model.set_inputs(&InputPatch::throttle(RUN_THRESHOLD_PCT));
        for _ in 0..200 {
            model.update(0.02);
        }
        assert!(!model.state().running);
        assert_eq!(model.state().thrust_n, 0.0);
    }
}
