//! The single write path for a panel's offset.
//!
//! Drag deltas and fling frames both land here, so the clamp applied by
//! [`OffsetController::apply`] is the only place an offset range is enforced.

use crate::panel::DraggablePanel;

pub struct OffsetController;

impl OffsetController {
    /// Moves `panel` toward `requested` within `[min_offset, max_offset]` and
    /// returns how much was consumed (`current - new`, positive toward `min_offset`).
    ///
    /// Nothing moves when `min_offset == 0` (the panel has no scroll range) or
    /// when the current offset already lies outside the range.
    pub fn apply<P>(panel: &mut P, requested: i32, min_offset: i32, max_offset: i32) -> i32
    where
        P: DraggablePanel + ?Sized,
    {
        let current = panel.top_and_bottom_offset();
        if min_offset == 0 || current < min_offset || current > max_offset {
            return 0;
        }

        let new_offset = requested.clamp(min_offset, max_offset);
        if new_offset == current {
            return 0;
        }
        panel.set_top_and_bottom_offset(new_offset);
        current.saturating_sub(new_offset)
    }

    /// Writes `offset` with no range restriction beyond `i32` itself.
    pub fn set_unbounded<P>(panel: &mut P, offset: i32) -> i32
    where
        P: DraggablePanel + ?Sized,
    {
        Self::apply(panel, offset, i32::MIN, i32::MAX)
    }

    /// Scrolls by `dy` (positive moves the panel up) and returns the consumed amount.
    pub fn scroll<P>(panel: &mut P, dy: i32, min_offset: i32, max_offset: i32) -> i32
    where
        P: DraggablePanel + ?Sized,
    {
        let requested = panel.offset_for_scrolling_sibling().saturating_sub(dy);
        Self::apply(panel, requested, min_offset, max_offset)
    }
}

#[cfg(test)]
#[path = "tests/offset_controller_tests.rs"]
mod tests;
