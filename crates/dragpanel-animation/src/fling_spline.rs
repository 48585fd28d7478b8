//! Spline fling physics.
//!
//! Scroller-style deceleration: a fling's total distance and duration come
//! from the initial velocity, and progress along the fling follows a
//! precomputed spline rather than a closed-form friction curve.

use std::sync::LazyLock;

const INFLECTION: f32 = 0.35;
const START_TENSION: f32 = 0.5;
const END_TENSION: f32 = 1.0;
const P1: f32 = START_TENSION * INFLECTION;
const P2: f32 = 1.0 - END_TENSION * (1.0 - INFLECTION);

const NB_SAMPLES: usize = 100;

/// `positions[i]` is the distance fraction covered at time fraction `i / NB_SAMPLES`;
/// `times[i]` is the time fraction at which distance fraction `i / NB_SAMPLES` is reached.
struct SplineTables {
    positions: [f32; NB_SAMPLES + 1],
    times: [f32; NB_SAMPLES + 1],
}

/// Solves the bezier for `alpha` by bisection, returning `(x, 3x(1-x))`.
/// `lower` carries the previous solution forward since alpha only grows.
fn solve_bezier(alpha: f32, lower: &mut f32, a: f32, b: f32) -> (f32, f32) {
    let mut upper = 1.0f32;
    loop {
        let mid = *lower + (upper - *lower) / 2.0;
        let coef = 3.0 * mid * (1.0 - mid);
        let value = coef * ((1.0 - mid) * a + mid * b) + mid * mid * mid;
        if (value - alpha).abs() < 1e-5 {
            return (mid, coef);
        }
        if value > alpha {
            upper = mid;
        } else {
            *lower = mid;
        }
    }
}

static TABLES: LazyLock<SplineTables> = LazyLock::new(|| {
    let mut positions = [0.0f32; NB_SAMPLES + 1];
    let mut times = [0.0f32; NB_SAMPLES + 1];
    let mut x_min = 0.0f32;
    let mut y_min = 0.0f32;

    for i in 0..NB_SAMPLES {
        let alpha = i as f32 / NB_SAMPLES as f32;

        let (x, coef) = solve_bezier(alpha, &mut x_min, P1, P2);
        positions[i] = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;

        let (y, coef) = solve_bezier(alpha, &mut y_min, START_TENSION, 1.0);
        times[i] = coef * ((1.0 - y) * P1 + y * P2) + y * y * y;
    }
    positions[0] = 0.0;
    times[0] = 0.0;
    positions[NB_SAMPLES] = 1.0;
    times[NB_SAMPLES] = 1.0;

    SplineTables { positions, times }
});

/// Linear interpolation into one of the spline tables.
fn sample(table: &[f32; NB_SAMPLES + 1], fraction: f32) -> (f32, f32) {
    let fraction = fraction.clamp(0.0, 1.0);
    let index = (NB_SAMPLES as f32 * fraction) as usize;
    if index >= NB_SAMPLES {
        return (1.0, 0.0);
    }
    let lo = index as f32 / NB_SAMPLES as f32;
    let hi = (index + 1) as f32 / NB_SAMPLES as f32;
    let slope = (table[index + 1] - table[index]) / (hi - lo);
    (table[index] + (fraction - lo) * slope, slope)
}

/// A point on the fling spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplinePoint {
    /// Fraction of the total fling distance covered (0.0 to 1.0).
    pub distance_coefficient: f32,
    /// Slope of the distance curve at this point.
    pub velocity_coefficient: f32,
}

pub struct AndroidFlingSpline;

impl AndroidFlingSpline {
    /// Samples the spline at `time` (fraction of the fling duration).
    pub fn fling_position(time: f32) -> SplinePoint {
        let (distance_coefficient, velocity_coefficient) = sample(&TABLES.positions, time);
        SplinePoint {
            distance_coefficient,
            velocity_coefficient,
        }
    }

    /// Time fraction at which the fling has covered `distance` of its total
    /// distance. Used to cut a fling short at a bound.
    pub fn time_for_distance(distance: f32) -> f32 {
        sample(&TABLES.times, distance).0
    }

    pub fn deceleration(velocity: f32, friction: f32) -> f64 {
        (INFLECTION as f64 * velocity.abs() as f64 / friction as f64).ln()
    }
}

const GRAVITY_EARTH: f32 = 9.80665;
const INCHES_PER_METER: f32 = 39.37;
/// `ln(0.78) / ln(0.9)`
const DECELERATION_RATE: f32 = 2.358_201_6;

fn physical_coefficient(density: f32) -> f32 {
    GRAVITY_EARTH * INCHES_PER_METER * density * 160.0 * 0.84
}

/// Distance and duration of a fling for one initial velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingInfo {
    pub initial_velocity: f32,
    /// Unsigned total distance in px.
    pub distance: f32,
    pub duration_ms: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingCalculator {
    friction: f32,
    physical_coefficient: f32,
}

impl FlingCalculator {
    pub const DEFAULT_FRICTION: f32 = 0.015;

    /// `friction` is the scroll friction, `density` the display scale factor
    /// (1.0 at 160 dpi).
    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            physical_coefficient: physical_coefficient(density),
        }
    }

    pub fn with_density(density: f32) -> Self {
        Self::new(Self::DEFAULT_FRICTION, density)
    }

    fn spline_deceleration(&self, velocity: f32) -> f64 {
        AndroidFlingSpline::deceleration(velocity, self.friction * self.physical_coefficient)
    }

    /// Duration in milliseconds; zero for a zero velocity.
    pub fn fling_duration(&self, velocity: f32) -> i64 {
        if velocity == 0.0 {
            return 0;
        }
        let l = self.spline_deceleration(velocity);
        (1000.0 * (l / (DECELERATION_RATE as f64 - 1.0)).exp()) as i64
    }

    /// Unsigned distance in px; zero for a zero velocity.
    pub fn fling_distance(&self, velocity: f32) -> f32 {
        if velocity == 0.0 {
            return 0.0;
        }
        let l = self.spline_deceleration(velocity);
        let decel_minus_one = DECELERATION_RATE as f64 - 1.0;
        self.friction
            * self.physical_coefficient
            * (DECELERATION_RATE as f64 / decel_minus_one * l).exp() as f32
    }

    pub fn fling_info(&self, velocity: f32) -> FlingInfo {
        FlingInfo {
            initial_velocity: velocity,
            distance: self.fling_distance(velocity),
            duration_ms: self.fling_duration(velocity),
        }
    }
}

#[cfg(test)]
#[path = "tests/fling_spline_tests.rs"]
mod tests;
