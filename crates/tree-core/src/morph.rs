use crate::mode::Mode;

/// Cubic smoothstep on `x` clamped to [0, 1]; zero slope at both ends.
#[inline]
pub fn smoothstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

/// Eased progress raised to a group's convergence weight.
///
/// A weight below 1 arrives ahead of the eased curve, above 1 lags behind it.
#[inline]
pub fn weighted_blend(progress: f32, weight: f32) -> f32 {
    smoothstep(progress).powf(weight)
}

/// The single morph parameter, exponentially damped toward the mode target.
#[derive(Clone, Debug)]
pub struct MorphController {
    progress: f32,
    damping_rate: f32,
}

impl MorphController {
    /// Starts settled at the value matching `initial`.
    pub fn new(initial: Mode, damping_rate: f32) -> Self {
        Self {
            progress: initial.target(),
            damping_rate,
        }
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn damping_rate(&self) -> f32 {
        self.damping_rate
    }

    /// Advance by `dt_sec` toward `mode`'s target and return the new progress.
    ///
    /// Moves `1 - exp(-rate * dt)` of the remaining distance, so the approach
    /// is monotonic, never overshoots, and is independent of frame rate.
    pub fn step(&mut self, dt_sec: f32, mode: Mode) -> f32 {
        if !dt_sec.is_finite() || dt_sec <= 0.0 {
            return self.progress;
        }
        let target = mode.target();
        let alpha = 1.0 - (-self.damping_rate * dt_sec).exp();
        self.progress = (self.progress + (target - self.progress) * alpha).clamp(0.0, 1.0);
        self.progress
    }
}
