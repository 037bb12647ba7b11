//! Frame time-step policy.

use crate::error::{SimError, SimResult};

/// Default longest frame the engine integrates in one `update` (s).
pub const DEFAULT_MAX_FRAME_DT: f64 = 0.25;

/// Bounds the wall-clock `dt` a host hands to `EngineModel::update`.
///
/// A host that stalls and resumes with a large `dt` would otherwise move the
/// spool many percent in one frame. Non-finite and negative steps count as
/// zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepPolicy {
    pub max_frame_dt_s: f64,
}

impl Default for StepPolicy {
    fn default() -> Self {
        Self {
            max_frame_dt_s: DEFAULT_MAX_FRAME_DT,
        }
    }
}

impl StepPolicy {
    pub fn new(max_frame_dt_s: f64) -> SimResult<Self> {
        if !max_frame_dt_s.is_finite() || max_frame_dt_s <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "max frame dt must be positive and finite",
            });
        }
        Ok(Self { max_frame_dt_s })
    }

    /// A policy that never clamps; the host owns the step size.
    pub fn unclamped() -> Self {
        Self {
            max_frame_dt_s: f64::INFINITY,
        }
    }

    /// The step actually integrated for a requested `dt`.
    pub fn frame_dt(&self, dt: f64) -> f64 {
        if !dt.is_finite() || dt <= 0.0 {
            0.0
        } else {
            dt.min(self.max_frame_dt_s)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_long_frames() {
        let p = StepPolicy::default();
        assert_eq!(p.frame_dt(0.02), 0.02);
        assert_eq!(p.frame_dt(5.0), DEFAULT_MAX_FRAME_DT);
    }

    #[test]
    fn rejects_garbage_steps() {
        let p = StepPolicy::default();
        assert_eq!(p.frame_dt(-1.0), 0.0);
        assert_eq!(p.frame_dt(f64::NAN), 0.0);
        assert_eq!(p.frame_dt(f64::INFINITY), 0.0);
    }

    #[test]
    fn invalid_policy() {
        assert!(StepPolicy::new(0.0).is_err());
        assert!(StepPolicy::new(f64::NAN).is_err());
        assert!(StepPolicy::new(0.1).is_ok());
    }

    #[test]
    fn unclamped_passes_through() {
        assert_eq!(StepPolicy::unclamped().frame_dt(30.0), 30.0);
    }
}
