//! Platform abstraction for the frame runtime.
//!
//! The host owns the display loop. The runtime only asks it for a frame when
//! a callback is queued, and the host answers by draining the runtime with the
//! frame's timestamp.

/// Schedules frames on behalf of the runtime.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}
