/// Residual below which the smoothed value snaps onto its target.
pub const SETTLE_EPSILON: f64 = 1e-4;

/// Exponential catch-up of a smoothed value toward a raw target.
///
/// Each step closes `1 - exp(-dt / scrub)` of the remaining gap, so `scrub` is the time
/// constant in seconds: after `scrub` seconds about 63% of a jump has been covered. With
/// `scrub == 0` the target passes through unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubSmoother {
    scrub: f64,
    value: f64,
}

impl ScrubSmoother {
    /// Start settled at `initial`.
    pub fn new(scrub: f64, initial: f64) -> Self {
        Self {
            scrub: scrub.max(0.0),
            value: initial,
        }
    }

    /// Current smoothed value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Advance by `dt` seconds toward `target` and return the new value.
    pub fn step(&mut self, target: f64, dt: f64) -> f64 {
        if self.scrub == 0.0 {
            self.value = target;
            return self.value;
        }
        if dt.is_finite() && dt > 0.0 {
            let alpha = 1.0 - (-dt / self.scrub).exp();
            self.value += (target - self.value) * alpha;
        }
        if (target - self.value).abs() < SETTLE_EPSILON {
            self.value = target;
        }
        self.value
    }

    /// Whether the value has reached `target`.
    pub fn is_settled(&self, target: f64) -> bool {
        self.value == target
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/smoothing.rs"]
mod tests;
