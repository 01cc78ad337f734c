//! Easing curves and time-driven animated values.
//!
//! Every animated element of the menu (logo offset, button fades, hover
//! scales, cursor press scale) is an [`AnimatedValue`] advanced by the frame
//! delta in milliseconds.

/// Easing curves mapping linear progress `t ∈ [0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEquation {
    Linear,
    OutQuad,
    InOutQuad,
    InOutCubic,
    InOutBack,
}

/// Overshoot amount used by the "back" curves.
const BACK_OVERSHOOT: f32 = 1.70158;

impl AnimationEquation {
    /// Computes the eased progress for `t`.
    pub fn calc(self, t: f32) -> f32 {
        match self {
            AnimationEquation::Linear => t,
            AnimationEquation::OutQuad => -t * (t - 2.0),
            AnimationEquation::InOutQuad => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * t * t
                } else {
                    let t = t - 1.0;
                    -0.5 * (t * (t - 2.0) - 1.0)
                }
            }
            AnimationEquation::InOutCubic => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * t * t * t
                } else {
                    let t = t - 2.0;
                    0.5 * (t * t * t + 2.0)
                }
            }
            AnimationEquation::InOutBack => {
                let s = BACK_OVERSHOOT * 1.525;
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * (t * t * ((s + 1.0) * t - s))
                } else {
                    let t = t - 2.0;
                    0.5 * (t * t * ((s + 1.0) * t + s) + 2.0)
                }
            }
        }
    }
}

/// A scalar ramping from `start` to `end` over a fixed duration.
///
/// The elapsed time is always clamped to `[0, duration]`, so running the ramp
/// backwards with a negative delta is supported and stops at `start`.
#[derive(Debug, Clone)]
pub struct AnimatedValue {
    time: i32,
    duration: i32,
    start: f32,
    end: f32,
    value: f32,
    equation: AnimationEquation,
}

impl AnimatedValue {
    pub fn new(duration: i32, start: f32, end: f32, equation: AnimationEquation) -> Self {
        let mut animated = Self {
            time: 0,
            duration: duration.max(0),
            start,
            end,
            value: start,
            equation,
        };
        animated.update_value();
        animated
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn time(&self) -> i32 {
        self.time
    }

    pub fn duration(&self) -> i32 {
        self.duration
    }

    pub fn equation(&self) -> AnimationEquation {
        self.equation
    }

    pub fn set_equation(&mut self, equation: AnimationEquation) {
        self.equation = equation;
        self.update_value();
    }

    /// Changes the duration, clamping the elapsed time into the new range.
    pub fn set_duration(&mut self, duration: i32) {
        self.duration = duration.max(0);
        self.time = self.time.clamp(0, self.duration);
        self.update_value();
    }

    /// Changes the ramp endpoints, keeping the elapsed time.
    pub fn set_values(&mut self, start: f32, end: f32) {
        self.start = start;
        self.end = end;
        self.update_value();
    }

    /// Sets the elapsed time (clamped). `set_time(0)` restarts the ramp.
    pub fn set_time(&mut self, time: i32) {
        self.time = time.clamp(0, self.duration);
        self.update_value();
    }

    pub fn is_finished(&self) -> bool {
        self.time >= self.duration
    }

    /// Advances the ramp by `delta` milliseconds.
    ///
    /// Returns `false` when the clamped time did not change, i.e. the ramp
    /// was already at the boundary it is moving towards.
    pub fn update(&mut self, delta: i32) -> bool {
        let new_time = self.time.saturating_add(delta).clamp(0, self.duration);
        if new_time == self.time {
            return false;
        }
        self.time = new_time;
        self.update_value();
        true
    }

    fn update_value(&mut self) {
        self.value = if self.time >= self.duration {
            self.end
        } else if self.time <= 0 {
            self.start
        } else {
            let t = self.time as f32 / self.duration as f32;
            self.start + (self.end - self.start) * self.equation.calc(t)
        };
    }
}
