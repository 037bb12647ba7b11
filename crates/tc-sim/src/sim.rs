//! Scenario runner and result recording.

use crate::engine::EngineModel;
use crate::error::{SimError, SimResult};
use crate::inputs::InputPatch;
use crate::state::EngineSnapshot;
use tracing::info;

/// Options for scenario runs.
#[derive(Clone, Debug, PartialEq)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 0.02,
            t_end: 10.0,
            max_steps: 1_000_000,
            record_every: 5,
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !self.t_end.is_finite() || self.t_end < 0.0 {
            return Err(SimError::InvalidArg {
                what: "t_end must be non-negative",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        Ok(())
    }

    /// Number of steps needed to reach `t_end`, capped at `max_steps`.
    pub fn step_count(&self) -> usize {
        let steps = (self.t_end / self.dt - 1e-9).ceil().max(0.0) as usize;
        steps.min(self.max_steps)
    }
}

/// An input change applied once simulated time reaches `time_s`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledPatch {
    pub time_s: f64,
    pub patch: InputPatch,
}

/// Time-ordered input changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schedule {
    events: Vec<ScheduledPatch>,
}

impl Schedule {
    pub fn new(mut events: Vec<ScheduledPatch>) -> Self {
        events.sort_by(|a, b| a.time_s.total_cmp(&b.time_s));
        Self { events }
    }

    pub fn at(mut self, time_s: f64, patch: InputPatch) -> Self {
        self.events.push(ScheduledPatch { time_s, patch });
        Self::new(self.events)
    }

    pub fn events(&self) -> &[ScheduledPatch] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Record of a scenario run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimRecord {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// Snapshots after each recorded step
    pub x: Vec<EngineSnapshot>,
}

impl SimRecord {
    pub fn last(&self) -> Option<(f64, &EngineSnapshot)> {
        self.t.last().copied().zip(self.x.last())
    }
}

/// Time tolerance for firing scheduled events.
const EVENT_EPS: f64 = 1e-9;

/// Drive `model` through a scenario at a fixed step.
///
/// Events fire before the step that starts at or after their time. The
/// initial snapshot (after t=0 events) and the final step are always
/// recorded.
pub fn run_scenario(
    model: &mut EngineModel,
    schedule: &Schedule,
    opts: &SimOptions,
) -> SimResult<SimRecord> {
    opts.validate()?;

    let steps = opts.step_count();
    info!(
        engine = model.design().engine_type.label(),
        steps,
        dt = opts.dt,
        events = schedule.events().len(),
        "scenario start"
    );

    let events = schedule.events();
    let mut next_event = 0;

    fire_due(model, events, &mut next_event, 0.0);
    let mut t_record = vec![0.0];
    let mut x_record = vec![model.snapshot()];

    for step in 1..=steps {
        let t_start = (step - 1) as f64 * opts.dt;
        if step > 1 {
            fire_due(model, events, &mut next_event, t_start);
        }
        model.update(opts.dt);

        if step % opts.record_every == 0 || step == steps {
            t_record.push(step as f64 * opts.dt);
            x_record.push(model.snapshot());
        }
    }

    if let Some(last) = x_record.last() {
        info!(
            t_end = steps as f64 * opts.dt,
            rpm = last.state.rpm_pct,
            thrust_n = last.state.thrust_n,
            "scenario complete"
        );
    }

    Ok(SimRecord {
        t: t_record,
        x: x_record,
    })
}

/// Apply every event due by `t`, advancing the cursor past them.
fn fire_due(model: &mut EngineModel, events: &[ScheduledPatch], next: &mut usize, t: f64) {
    while let Some(event) = events.get(*next) {
        if event.time_s > t + EVENT_EPS {
            break;
        }
        model.set_inputs(&event.patch);
        *next += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::Design;

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert_eq!(opts.dt, 0.02);
        assert_eq!(opts.t_end, 10.0);
        assert_eq!(opts.step_count(), 500);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn sim_options_invalid() {
        let bad_dt = SimOptions {
            dt: 0.0,
            ..SimOptions::default()
        };
        assert!(bad_dt.validate().is_err());

        let bad_record = SimOptions {
            record_every: 0,
            ..SimOptions::default()
        };
        assert!(bad_record.validate().is_err());

        let nan_end = SimOptions {
            t_end: f64::NAN,
            ..SimOptions::default()
        };
        assert!(nan_end.validate().is_err());
    }

    #[test]
    fn step_count_respects_cap() {
        let opts = SimOptions {
            max_steps: 10,
            ..SimOptions::default()
        };
        assert_eq!(opts.step_count(), 10);
    }

    #[test]
    fn schedule_sorts_events() {
        let s = Schedule::default()
            .at(2.0, InputPatch::throttle(50.0))
            .at(1.0, InputPatch::throttle(80.0));
        let times: Vec<f64> = s.events().iter().map(|e| e.time_s).collect();
        assert_eq!(times, vec![1.0, 2.0]);
    }

    #[test]
    fn records_initial_and_final() {
        let mut model = EngineModel::new(Design::turbojet()).unwrap();
        let opts = SimOptions {
            dt: 0.02,
            t_end: 1.0,
            record_every: 7,
            ..SimOptions::default()
        };
        let rec = run_scenario(&mut model, &Schedule::default(), &opts).unwrap();
        assert_eq!(rec.t[0], 0.0);
        let (t_last, _) = rec.last().unwrap();
        assert!((t_last - 1.0).abs() < 1e-9);
        // 50 steps, every 7th plus the final one, plus t=0
        assert_eq!(rec.t.len(), 1 + 7 + 1);
        assert_eq!(rec.t.len(), rec.x.len());
    }

    #[test]
    fn events_fire_on_time() {
        let mut model = EngineModel::new(Design::turbojet()).unwrap();
        let schedule = Schedule::default().at(0.5, InputPatch::throttle(100.0));
        let opts = SimOptions {
            dt: 0.1,
            t_end: 1.0,
            record_every: 1,
            ..SimOptions::default()
        };
        let rec = run_scenario(&mut model, &schedule, &opts).unwrap();
        // Nothing moves until the step starting at 0.5 s
        assert_eq!(rec.x[5].state.rpm_pct, 0.0);
        assert!((rec.x[6].state.rpm_pct - 2.0).abs() < 1e-9);
        assert!((rec.x[10].state.rpm_pct - 10.0).abs() < 1e-9);
    }
}
