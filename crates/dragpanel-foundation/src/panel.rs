use crate::view_configuration::ViewConfiguration;

/// A vertically offsettable panel that gestures and flings can move.
///
/// The first four methods are the host's storage and hit-testing; the rest are
/// hooks a concrete panel variant overrides to shape drag behavior. A panel is
/// not draggable unless it opts in through [`can_drag`](Self::can_drag).
pub trait DraggablePanel {
    /// Current vertical offset from the panel's layout position.
    fn top_and_bottom_offset(&self) -> i32;

    /// Stores a new offset, returning whether it changed.
    fn set_top_and_bottom_offset(&mut self, offset: i32) -> bool;

    fn height(&self) -> i32;

    /// Hit test in the coordinate space of incoming pointer events.
    fn is_point_within_bounds(&self, x: i32, y: i32) -> bool;

    fn view_configuration(&self) -> ViewConfiguration {
        ViewConfiguration::default()
    }

    fn can_drag(&self) -> bool {
        false
    }

    /// Lowest offset a drag may reach.
    fn max_drag_offset(&self) -> i32 {
        -self.height()
    }

    /// Distance a release fling may travel below zero.
    fn scroll_range_for_fling(&self) -> i32 {
        self.height()
    }

    /// Offset that drag deltas are applied to. Panels whose visible offset
    /// lags their logical one (e.g. while an external animation runs) return
    /// the logical value here.
    fn offset_for_scrolling_sibling(&self) -> i32 {
        self.top_and_bottom_offset()
    }

    /// Called when a fling settles, or when one was requested but had too
    /// little velocity to move.
    fn on_fling_finished(&mut self) {}
}

/// Offset storage for panel implementations: a layout position plus the
/// displacement applied on top of it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ViewOffset {
    layout_top: i32,
    offset: i32,
}

impl ViewOffset {
    pub fn new(layout_top: i32) -> Self {
        Self {
            layout_top,
            offset: 0,
        }
    }

    /// Records a new layout position; the offset is kept.
    pub fn on_layout(&mut self, layout_top: i32) {
        self.layout_top = layout_top;
    }

    pub fn layout_top(&self) -> i32 {
        self.layout_top
    }

    /// Where the panel is drawn.
    pub fn top(&self) -> i32 {
        self.layout_top.saturating_add(self.offset)
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: i32) -> bool {
        if self.offset == offset {
            return false;
        }
        self.offset = offset;
        true
    }
}
