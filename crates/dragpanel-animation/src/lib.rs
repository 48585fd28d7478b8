//! Decay physics for dragpanel flings.
//!
//! [`FlingCalculator`] answers "how far and how long" for a velocity, and
//! [`DecayScroller`] plays that answer back frame by frame inside bounds.

mod easing;
mod fling_spline;
mod scroller;

pub use easing::Easing;
pub use fling_spline::{AndroidFlingSpline, FlingCalculator, FlingInfo, SplinePoint};
pub use scroller::{DecayScroller, DEFAULT_MIN_VELOCITY, SPRING_BACK_DURATION_MS};
