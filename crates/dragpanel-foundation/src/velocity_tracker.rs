//! Release-velocity estimation.
//!
//! Each pointer's vertical position feeds its own impulse-strategy tracker:
//! velocity is derived from the kinetic energy the samples impart rather than
//! from a line fit, which keeps short, sharp flicks from being under-reported.

use smallvec::SmallVec;

use crate::pointer::{PointerEvent, PointerEventKind, PointerId};

const HISTORY_SIZE: usize = 20;

/// Samples older than this (relative to the newest) are ignored.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Velocity of one coordinate of one pointer.
#[derive(Clone, Debug)]
pub struct AxisVelocityTracker {
    ring: [Option<Sample>; HISTORY_SIZE],
    head: usize,
}

impl Default for AxisVelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisVelocityTracker {
    pub fn new() -> Self {
        Self {
            ring: [None; HISTORY_SIZE],
            head: 0,
        }
    }

    pub fn add_sample(&mut self, time_ms: i64, position: f32) {
        self.head = (self.head + 1) % HISTORY_SIZE;
        self.ring[self.head] = Some(Sample { time_ms, position });
    }

    pub fn reset(&mut self) {
        self.ring = [None; HISTORY_SIZE];
        self.head = 0;
    }

    pub fn has_samples(&self) -> bool {
        self.ring[self.head].is_some()
    }

    /// Velocity in units per second, or 0.0 with fewer than two usable samples.
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.ring[self.head] else {
            return 0.0;
        };

        // Newest first; times are negative ages relative to `newest`.
        let mut positions: SmallVec<[f32; HISTORY_SIZE]> = SmallVec::new();
        let mut times: SmallVec<[f32; HISTORY_SIZE]> = SmallVec::new();
        let mut index = self.head;
        while let Some(sample) = self.ring[index] {
            let age = newest.time_ms - sample.time_ms;
            if age > HORIZON_MS {
                break;
            }
            let gap = times.last().map_or(0, |&newer| age + newer as i64);
            if gap > ASSUME_STOPPED_MS {
                break;
            }
            positions.push(sample.position);
            times.push(-(age as f32));
            if positions.len() == HISTORY_SIZE {
                break;
            }
            index = (index + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if positions.len() < 2 {
            return 0.0;
        }
        impulse_velocity(&positions, &times) * 1000.0
    }

    /// Like [`velocity`](Self::velocity) but clamped to `±max_velocity`.
    pub fn velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }
}

/// Impulse estimate in units per millisecond. Inputs are ordered newest first.
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let oldest = positions.len() - 1;
    let mut work = 0.0f32;

    for i in (1..=oldest).rev() {
        let dt = times[i - 1] - times[i];
        if dt == 0.0 {
            continue;
        }
        let v_curr = (positions[i - 1] - positions[i]) / dt;
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }

    energy_to_velocity(work)
}

/// `E = ½ v²` with unit mass.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

/// Vertical velocity of every pointer in a gesture.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    pointers: SmallVec<[(PointerId, AxisVelocityTracker); 2]>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the y coordinate of every pointer in `event`.
    ///
    /// A [`PointerEventKind::Down`] starts a new gesture and drops old history.
    pub fn add_movement(&mut self, event: &PointerEvent) {
        if event.kind == PointerEventKind::Down {
            self.clear();
        }
        for pointer in event.pointers() {
            let tracker = match self.pointers.iter().position(|(id, _)| *id == pointer.id) {
                Some(index) => &mut self.pointers[index].1,
                None => {
                    self.pointers.push((pointer.id, AxisVelocityTracker::new()));
                    let last = self.pointers.len() - 1;
                    &mut self.pointers[last].1
                }
            };
            tracker.add_sample(event.time_ms, pointer.y);
        }
    }

    pub fn clear(&mut self) {
        self.pointers.clear();
    }

    pub fn has_samples(&self, id: PointerId) -> bool {
        self.pointers
            .iter()
            .any(|(pointer, tracker)| *pointer == id && tracker.has_samples())
    }

    /// Vertical velocity of `id` in px/s, clamped to `±max_velocity`.
    /// Unknown pointers report zero.
    pub fn y_velocity(&self, id: PointerId, max_velocity: f32) -> f32 {
        self.pointers
            .iter()
            .find(|(pointer, _)| *pointer == id)
            .map(|(_, tracker)| tracker.velocity_with_max(max_velocity))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
#[path = "tests/velocity_tracker_tests.rs"]
mod tests;
