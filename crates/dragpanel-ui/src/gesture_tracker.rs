//! Slop-based vertical drag recognition.
//!
//! Events arrive in two passes, mirroring how a container routes touches:
//! [`GestureTracker::on_intercept`] only decides whether the gesture has
//! become a drag, and [`GestureTracker::on_touch_event`] is the pass that
//! actually moves the panel. A container may steal the gesture between the
//! two, so the intercept pass never writes offsets.

use dragpanel_foundation::{
    DraggablePanel, OffsetController, PointerEvent, PointerEventKind, PointerId, VelocityTracker,
    ViewConfiguration,
};

/// State of the drag currently being tracked.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PointerSession {
    /// Pointer that armed the session; `None` while idle.
    pub active_pointer_id: Option<PointerId>,
    pub last_y: i32,
    pub is_dragging: bool,
}

/// Parameters for the fling a release asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingRequest {
    pub min_offset: i32,
    pub max_offset: i32,
    /// Release velocity in px/s; positive when the pointer moved down.
    pub velocity_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchOutcome {
    /// The event is not ours: a press outside the panel, a panel that can't
    /// be dragged, or a move whose pointer is gone.
    Rejected,
    /// A pointer-down armed a new session.
    Armed,
    /// Handled; `consumed` is what the panel's offset absorbed.
    Handled { consumed: i32 },
    /// The tracked pointer lifted.
    Released(FlingRequest),
}

impl TouchOutcome {
    pub fn is_handled(&self) -> bool {
        !matches!(self, TouchOutcome::Rejected)
    }
}

#[derive(Debug, Default)]
pub struct GestureTracker {
    session: PointerSession,
    /// Resolved from the first panel seen, then reused.
    config: Option<ViewConfiguration>,
    velocity_tracker: Option<VelocityTracker>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> PointerSession {
        self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging
    }

    pub fn active_pointer_id(&self) -> Option<PointerId> {
        self.session.active_pointer_id
    }

    pub fn is_sampling_velocity(&self) -> bool {
        self.velocity_tracker.is_some()
    }

    /// Scaled touch slop in use, once resolved.
    pub fn touch_slop(&self) -> Option<i32> {
        self.config.map(|config| config.scaled_touch_slop())
    }

    /// Whether a pointer-down event would arm a session on `panel`.
    pub fn accepts_down<P>(panel: &P, event: &PointerEvent) -> bool
    where
        P: DraggablePanel + ?Sized,
    {
        let pointer = event.primary();
        event.kind == PointerEventKind::Down
            && panel.can_drag()
            && panel.is_point_within_bounds(pointer.x as i32, pointer.y as i32)
    }

    /// Interception pass. Returns whether the gesture is now a drag.
    pub fn on_intercept<P>(&mut self, panel: &P, event: &PointerEvent) -> bool
    where
        P: DraggablePanel + ?Sized,
    {
        let config = self.resolve_config(panel);

        if event.kind == PointerEventKind::Move && self.session.is_dragging {
            return true;
        }

        match event.kind {
            PointerEventKind::Down => {
                self.session = PointerSession::default();
                if Self::accepts_down(panel, event) {
                    self.arm(event);
                }
            }
            PointerEventKind::Move => {
                if let Some(y) = self.tracked_y(event) {
                    if y.abs_diff(self.session.last_y) > config.scaled_touch_slop().unsigned_abs() {
                        log::debug!("drag intercepted at y={y}");
                        self.session.is_dragging = true;
                        self.session.last_y = y;
                    }
                }
            }
            PointerEventKind::Up | PointerEventKind::Cancel => self.reset(),
            PointerEventKind::PointerDown | PointerEventKind::PointerUp => {}
        }

        if let Some(tracker) = self.velocity_tracker.as_mut() {
            tracker.add_movement(event);
        }
        self.session.is_dragging
    }

    /// Handling pass. Moves `panel` and reports what happened.
    pub fn on_touch_event<P>(&mut self, panel: &mut P, event: &PointerEvent) -> TouchOutcome
    where
        P: DraggablePanel + ?Sized,
    {
        let config = self.resolve_config(panel);

        let outcome = match event.kind {
            PointerEventKind::Down => {
                if !Self::accepts_down(panel, event) {
                    return TouchOutcome::Rejected;
                }
                self.session = PointerSession::default();
                self.arm(event);
                TouchOutcome::Armed
            }
            PointerEventKind::Move => {
                let Some(y) = self.tracked_y(event) else {
                    return TouchOutcome::Rejected;
                };
                let touch_slop = config.scaled_touch_slop();
                let mut dy = self.session.last_y.saturating_sub(y);

                if !self.session.is_dragging && dy.unsigned_abs() > touch_slop.unsigned_abs() {
                    self.session.is_dragging = true;
                    // Start the drag from the slop boundary so the panel doesn't jump.
                    if dy > 0 {
                        dy -= touch_slop;
                    } else {
                        dy += touch_slop;
                    }
                    log::debug!("drag started, first delta {dy}");
                }

                let mut consumed = 0;
                if self.session.is_dragging {
                    self.session.last_y = y;
                    let min_offset = panel.max_drag_offset();
                    consumed = OffsetController::scroll(panel, dy, min_offset, 0);
                }
                TouchOutcome::Handled { consumed }
            }
            PointerEventKind::Up => {
                let request = match (self.velocity_tracker.as_mut(), self.session.active_pointer_id) {
                    (Some(tracker), Some(id)) => {
                        tracker.add_movement(event);
                        Some(FlingRequest {
                            min_offset: panel.scroll_range_for_fling().saturating_neg(),
                            max_offset: 0,
                            velocity_y: tracker.y_velocity(id, config.max_fling_velocity()),
                        })
                    }
                    _ => None,
                };
                self.reset();
                return match request {
                    Some(request) => TouchOutcome::Released(request),
                    None => TouchOutcome::Handled { consumed: 0 },
                };
            }
            PointerEventKind::Cancel => {
                self.reset();
                TouchOutcome::Handled { consumed: 0 }
            }
            PointerEventKind::PointerDown | PointerEventKind::PointerUp => {
                TouchOutcome::Handled { consumed: 0 }
            }
        };

        if let Some(tracker) = self.velocity_tracker.as_mut() {
            tracker.add_movement(event);
        }
        outcome
    }

    /// Drops the session and any velocity samples. The resolved touch slop is kept.
    pub fn reset(&mut self) {
        self.session = PointerSession::default();
        self.velocity_tracker = None;
    }

    fn resolve_config<P>(&mut self, panel: &P) -> ViewConfiguration
    where
        P: DraggablePanel + ?Sized,
    {
        *self.config.get_or_insert_with(|| panel.view_configuration())
    }

    fn arm(&mut self, event: &PointerEvent) {
        let pointer = event.primary();
        self.session.active_pointer_id = Some(pointer.id);
        self.session.last_y = pointer.y as i32;
        self.velocity_tracker.get_or_insert_with(VelocityTracker::new);
    }

    /// y of the tracked pointer, if it is still part of `event`.
    fn tracked_y(&self, event: &PointerEvent) -> Option<i32> {
        let id = self.session.active_pointer_id?;
        let index = event.find_pointer_index(id)?;
        event.pointer(index).map(|pointer| pointer.y as i32)
    }
}

#[cfg(test)]
#[path = "tests/gesture_tracker_tests.rs"]
mod tests;
