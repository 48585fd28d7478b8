//! Bounded vertical decay model.
//!
//! [`DecayScroller`] turns a release velocity into a sequence of integer
//! positions that settle inside `[min, max]`. It is stepped with frame
//! timestamps; the first step anchors the animation's start time so playback
//! is independent of when the fling was requested.

use crate::easing::Easing;
use crate::fling_spline::{AndroidFlingSpline, FlingCalculator};

/// Duration of the settle animation used when a fling starts out of bounds.
pub const SPRING_BACK_DURATION_MS: i64 = 250;

/// Minimum |velocity| in px/s for a fling to move at all.
pub const DEFAULT_MIN_VELOCITY: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Spline,
    SpringBack,
}

#[derive(Debug, Clone)]
pub struct DecayScroller {
    calculator: FlingCalculator,
    min_velocity: f32,
    mode: Mode,
    start: i32,
    current: i32,
    final_position: i32,
    /// Signed distance of the unbounded fling.
    spline_distance: f32,
    /// Duration of the unbounded fling; progress along the spline is measured against it.
    spline_duration_ms: i64,
    /// Actual duration, shortened when the fling is cut off at a bound.
    duration_ms: i64,
    current_velocity: f32,
    start_time_nanos: Option<u64>,
    finished: bool,
}

impl DecayScroller {
    pub fn new(calculator: FlingCalculator) -> Self {
        Self {
            calculator,
            min_velocity: DEFAULT_MIN_VELOCITY,
            mode: Mode::Spline,
            start: 0,
            current: 0,
            final_position: 0,
            spline_distance: 0.0,
            spline_duration_ms: 0,
            duration_ms: 0,
            current_velocity: 0.0,
            start_time_nanos: None,
            finished: true,
        }
    }

    pub fn with_min_velocity(mut self, min_velocity: f32) -> Self {
        self.min_velocity = min_velocity.abs();
        self
    }

    /// Starts a fling from `start` and returns whether any motion will occur.
    ///
    /// A start position outside `[min, max]` settles back to the nearest bound
    /// regardless of velocity.
    pub fn fling(&mut self, start: i32, velocity: f32, min: i32, max: i32) -> bool {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };

        self.start = start;
        self.current = start;
        self.final_position = start;
        self.spline_distance = 0.0;
        self.spline_duration_ms = 0;
        self.duration_ms = 0;
        self.current_velocity = velocity;
        self.start_time_nanos = None;
        self.finished = true;

        if start < min || start > max {
            self.mode = Mode::SpringBack;
            self.final_position = start.clamp(min, max);
            self.duration_ms = SPRING_BACK_DURATION_MS;
            self.current_velocity = 0.0;
            self.finished = false;
            return true;
        }

        self.mode = Mode::Spline;
        if !velocity.is_finite() || velocity.abs() < self.min_velocity {
            self.current_velocity = 0.0;
            return false;
        }

        let info = self.calculator.fling_info(velocity);
        self.spline_distance = info.distance * velocity.signum();
        self.spline_duration_ms = info.duration_ms;
        self.duration_ms = info.duration_ms;

        let unbounded = start as f64 + self.spline_distance.round() as f64;
        let bounded = unbounded.clamp(min as f64, max as f64) as i32;
        if bounded as f64 != unbounded && self.spline_distance != 0.0 {
            // Stop at the bound, at the moment the spline reaches it.
            let covered = ((bounded - start) as f32 / self.spline_distance).abs();
            let time = AndroidFlingSpline::time_for_distance(covered);
            self.duration_ms = (self.spline_duration_ms as f32 * time) as i64;
        }
        self.final_position = bounded;

        if self.final_position == start {
            self.current_velocity = 0.0;
            return false;
        }
        // A bound a few px away can be reached in under a millisecond; still
        // spend one frame getting there.
        self.duration_ms = self.duration_ms.max(1);

        self.finished = false;
        true
    }

    /// Advances the model to `frame_time_nanos`.
    ///
    /// Returns `true` when a position was produced (the settling frame
    /// included) and `false` once the model had already finished.
    pub fn compute_offset(&mut self, frame_time_nanos: u64) -> bool {
        if self.finished {
            return false;
        }

        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_ms = (frame_time_nanos.saturating_sub(start_time) / 1_000_000) as i64;

        if elapsed_ms >= self.duration_ms {
            self.current = self.final_position;
            self.current_velocity = 0.0;
            self.finished = true;
            return true;
        }

        match self.mode {
            Mode::Spline => {
                let point = AndroidFlingSpline::fling_position(
                    elapsed_ms as f32 / self.spline_duration_ms as f32,
                );
                let travelled = (point.distance_coefficient * self.spline_distance).round() as i32;
                let (lo, hi) = if self.start <= self.final_position {
                    (self.start, self.final_position)
                } else {
                    (self.final_position, self.start)
                };
                self.current = self.start.saturating_add(travelled).clamp(lo, hi);
                self.current_velocity = point.velocity_coefficient * self.spline_distance
                    / self.spline_duration_ms as f32
                    * 1000.0;
            }
            Mode::SpringBack => {
                let fraction = elapsed_ms as f32 / self.duration_ms as f32;
                let distance = (self.final_position - self.start) as f32;
                let eased = Easing::FastOutSlowInEasing.transform(fraction);
                self.current = self.start + (distance * eased).round() as i32;
            }
        }
        true
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn final_position(&self) -> i32 {
        self.final_position
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    /// Velocity in px/s at the last computed frame.
    pub fn current_velocity(&self) -> f32 {
        self.current_velocity
    }
}

#[cfg(test)]
#[path = "tests/scroller_tests.rs"]
mod tests;
