//! Frame scheduling runtime for dragpanel.
//!
//! Everything here is single-threaded: callbacks are queued on the UI thread
//! and run when the host drains the runtime once per display refresh.

mod frame_clock;
mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock, FrameTicker};
pub use platform::RuntimeScheduler;
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;
