//! Fling driver for draggable panels.
//!
//! Steps a [`DecayScroller`] once per frame through the runtime's frame
//! callbacks and writes each position to the panel. Only one fling runs per
//! simulator; starting another or stopping cancels the pending frame.

use dragpanel_animation::DecayScroller;
use dragpanel_core::{FrameCallbackRegistration, FrameClock, RuntimeHandle};
use dragpanel_foundation::{DraggablePanel, OffsetController};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

struct FlingState<P> {
    /// Weak so a dropped panel ends the fling instead of being kept alive by it.
    panel: Weak<RefCell<P>>,
    scroller: DecayScroller,
    cancelled: Rc<Cell<bool>>,
    /// Pending frame; dropping it unschedules the step.
    registration: Option<FrameCallbackRegistration>,
}

type SharedState<P> = Rc<RefCell<Option<FlingState<P>>>>;

enum FrameStep<P> {
    Continue,
    Settled(Rc<RefCell<P>>),
    PanelGone,
}

/// Schedules one frame step, chaining the next from inside it.
/// Returns false when the runtime is gone and no frame will ever come.
fn schedule_next_frame<P>(state: SharedState<P>, frame_clock: FrameClock, cancelled: Rc<Cell<bool>>) -> bool
where
    P: DraggablePanel + 'static,
{
    let state_for_frame = Rc::clone(&state);
    let clock_for_frame = frame_clock.clone();
    let cancelled_for_frame = Rc::clone(&cancelled);

    let registration = frame_clock.with_frame_nanos(move |frame_time_nanos| {
        if cancelled_for_frame.get() {
            return;
        }

        let step = {
            let mut guard = state_for_frame.borrow_mut();
            let Some(fling) = guard.as_mut() else {
                return;
            };
            match fling.panel.upgrade() {
                None => FrameStep::PanelGone,
                Some(panel) => {
                    if fling.scroller.compute_offset(frame_time_nanos) {
                        let position = fling.scroller.current();
                        log::trace!("fling frame at {frame_time_nanos}ns -> {position}");
                        OffsetController::set_unbounded(&mut *panel.borrow_mut(), position);
                        FrameStep::Continue
                    } else {
                        FrameStep::Settled(panel)
                    }
                }
            }
        };

        match step {
            FrameStep::Continue => {
                schedule_next_frame(state_for_frame, clock_for_frame, cancelled_for_frame);
            }
            FrameStep::Settled(panel) => {
                state_for_frame.borrow_mut().take();
                log::debug!("fling settled");
                panel.borrow_mut().on_fling_finished();
            }
            FrameStep::PanelGone => {
                state_for_frame.borrow_mut().take();
                log::trace!("fling dropped, panel is gone");
            }
        }
    });

    let active = registration.is_active();
    if let Some(fling) = state.borrow_mut().as_mut() {
        fling.registration = Some(registration);
    }
    active
}

/// Animates a panel's offset from a release velocity to rest.
pub struct FlingSimulator<P: DraggablePanel + 'static> {
    state: SharedState<P>,
    frame_clock: FrameClock,
}

impl<P: DraggablePanel + 'static> FlingSimulator<P> {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            state: Rc::new(RefCell::new(None)),
            frame_clock: runtime.frame_clock(),
        }
    }

    /// Starts a fling from the panel's current offset, replacing any running one.
    ///
    /// Returns false, after notifying [`DraggablePanel::on_fling_finished`],
    /// when the velocity is too small to move the panel.
    pub fn start(
        &self,
        panel: &Rc<RefCell<P>>,
        min_offset: i32,
        max_offset: i32,
        velocity: f32,
    ) -> bool {
        self.stop();

        let (config, start) = {
            let panel = panel.borrow();
            (panel.view_configuration(), panel.top_and_bottom_offset())
        };
        let mut scroller = DecayScroller::new(config.fling_calculator())
            .with_min_velocity(config.min_fling_velocity());

        if !scroller.fling(start, velocity, min_offset, max_offset) {
            log::debug!("fling at {velocity}px/s from {start} has nowhere to go");
            panel.borrow_mut().on_fling_finished();
            return false;
        }
        log::debug!(
            "fling at {velocity}px/s from {start} toward {} over {}ms",
            scroller.final_position(),
            scroller.duration_ms()
        );

        let cancelled = Rc::new(Cell::new(false));
        *self.state.borrow_mut() = Some(FlingState {
            panel: Rc::downgrade(panel),
            scroller,
            cancelled: Rc::clone(&cancelled),
            registration: None,
        });

        if !schedule_next_frame(Rc::clone(&self.state), self.frame_clock.clone(), cancelled) {
            log::warn!("no runtime to drive the fling; finishing immediately");
            self.stop();
            panel.borrow_mut().on_fling_finished();
            return false;
        }
        true
    }

    /// Cancels the running fling, if any, without a finished notification.
    pub fn stop(&self) {
        let previous = self.state.borrow_mut().take();
        if let Some(fling) = previous {
            fling.cancelled.set(true);
            drop(fling.registration);
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Where the running fling will come to rest.
    pub fn target_offset(&self) -> Option<i32> {
        self.state
            .borrow()
            .as_ref()
            .map(|fling| fling.scroller.final_position())
    }
}

impl<P: DraggablePanel + 'static> Drop for FlingSimulator<P> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "tests/fling_animation_tests.rs"]
mod tests;
