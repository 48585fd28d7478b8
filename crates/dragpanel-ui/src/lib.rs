//! Touch-driven drag and fling for vertically offset panels.
//!
//! [`HeaderDragBehavior`] is the entry point: feed it the host's pointer
//! events and drain the [`dragpanel_core::Runtime`] once per frame.

mod fling_animation;
mod gesture_tracker;
mod header_behavior;

pub use fling_animation::FlingSimulator;
pub use gesture_tracker::{FlingRequest, GestureTracker, PointerSession, TouchOutcome};
pub use header_behavior::HeaderDragBehavior;

pub use dragpanel_core::{Runtime, RuntimeHandle};
pub use dragpanel_foundation::{DraggablePanel, PointerEvent, ViewConfiguration};

#[cfg(test)]
#[path = "tests/test_panel.rs"]
pub(crate) mod test_panel;
