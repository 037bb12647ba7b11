//! Spool dynamics: a rate-limited lag toward the governed target.

use crate::design::Design;
use crate::inputs::Inputs;

/// Spool speed (%) above which the cycle is solved.
pub const RUN_THRESHOLD_PCT: f64 = 5.0;

/// Move `current_rpm` toward `target_rpm` by at most `ramp_rate_pct_per_s·dt`.
///
/// Never overshoots the target in either direction.
pub fn advance_spool(current_rpm: f64, target_rpm: f64, ramp_rate_pct_per_s: f64, dt: f64) -> f64 {
    let max_step = (ramp_rate_pct_per_s * dt).abs();
    let delta = (target_rpm - current_rpm).max(-max_step).min(max_step);
    current_rpm + delta
}

/// Spool target for the current inputs.
///
/// With ignition on the governor holds at least idle; otherwise the spool
/// follows the throttle directly.
pub fn governed_target(inputs: &Inputs, design: &Design) -> f64 {
    if inputs.ignition {
        inputs.throttle_pct.max(design.idle_rpm_pct)
    } else {
        inputs.throttle_pct
    }
}

/// Whether a spool speed is high enough to run the cycle.
pub fn is_running(rpm_pct: f64) -> bool {
    rpm_pct > RUN_THRESHOLD_PCT
}
