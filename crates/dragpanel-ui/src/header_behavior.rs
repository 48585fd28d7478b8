//! Drag-and-fling behavior for a header-style panel.
//!
//! Ties one [`GestureTracker`] to one [`FlingSimulator`] for a single panel.
//! The host forwards both touch passes here and drains the runtime every frame.

use dragpanel_core::RuntimeHandle;
use dragpanel_foundation::{DraggablePanel, OffsetController, PointerEvent};
use std::cell::RefCell;
use std::rc::Rc;

use crate::fling_animation::FlingSimulator;
use crate::gesture_tracker::{GestureTracker, TouchOutcome};

pub struct HeaderDragBehavior<P: DraggablePanel + 'static> {
    tracker: GestureTracker,
    fling: FlingSimulator<P>,
}

impl<P: DraggablePanel + 'static> HeaderDragBehavior<P> {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            tracker: GestureTracker::new(),
            fling: FlingSimulator::new(runtime),
        }
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    /// Interception pass; true once the gesture has become a drag.
    pub fn on_intercept(&mut self, panel: &Rc<RefCell<P>>, event: &PointerEvent) -> bool {
        self.stop_fling_for_new_gesture(panel, event);
        self.tracker.on_intercept(&*panel.borrow(), event)
    }

    /// Handling pass; true when the event was consumed.
    pub fn on_event(&mut self, panel: &Rc<RefCell<P>>, event: &PointerEvent) -> bool {
        self.on_event_outcome(panel, event).is_handled()
    }

    /// Handling pass with the full outcome, for callers chaining consumption
    /// to other scrollable regions.
    pub fn on_event_outcome(&mut self, panel: &Rc<RefCell<P>>, event: &PointerEvent) -> TouchOutcome {
        self.stop_fling_for_new_gesture(panel, event);
        let outcome = self.tracker.on_touch_event(&mut *panel.borrow_mut(), event);
        if let TouchOutcome::Released(request) = outcome {
            self.fling
                .start(panel, request.min_offset, request.max_offset, request.velocity_y);
        }
        outcome
    }

    /// Starts a fling directly, e.g. when a nested scroll hands over its velocity.
    pub fn fling(&self, panel: &Rc<RefCell<P>>, min_offset: i32, max_offset: i32, velocity: f32) -> bool {
        self.fling.start(panel, min_offset, max_offset, velocity)
    }

    pub fn stop_fling(&self) {
        self.fling.stop();
    }

    pub fn is_flinging(&self) -> bool {
        self.fling.is_running()
    }

    pub fn fling_target(&self) -> Option<i32> {
        self.fling.target_offset()
    }

    /// Scrolls by `dy` within `[min_offset, max_offset]`; returns the consumed amount.
    pub fn scroll(&self, panel: &Rc<RefCell<P>>, dy: i32, min_offset: i32, max_offset: i32) -> i32 {
        OffsetController::scroll(&mut *panel.borrow_mut(), dy, min_offset, max_offset)
    }

    pub fn set_header_offset(
        &self,
        panel: &Rc<RefCell<P>>,
        offset: i32,
        min_offset: i32,
        max_offset: i32,
    ) -> i32 {
        OffsetController::apply(&mut *panel.borrow_mut(), offset, min_offset, max_offset)
    }

    /// The panel left the hierarchy: drop the gesture and any fling.
    pub fn on_detached(&mut self) {
        self.fling.stop();
        self.tracker.reset();
    }

    fn stop_fling_for_new_gesture(&self, panel: &Rc<RefCell<P>>, event: &PointerEvent) {
        if self.fling.is_running() && GestureTracker::accepts_down(&*panel.borrow(), event) {
            log::debug!("new gesture interrupts fling");
            self.fling.stop();
        }
    }
}

#[cfg(test)]
#[path = "tests/header_behavior_tests.rs"]
mod tests;
