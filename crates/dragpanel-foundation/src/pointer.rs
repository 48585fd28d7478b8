//! Raw pointer events as delivered by the host.
//!
//! An event is a snapshot of every pointer currently down, plus which of them
//! the action refers to. Pointers are addressed by index within one event and
//! by [`PointerId`] across events; an id's index may change between events.

use smallvec::SmallVec;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    /// First pointer went down.
    Down,
    Move,
    /// Last pointer went up.
    Up,
    Cancel,
    /// An additional pointer went down while others are held.
    PointerDown,
    /// A pointer went up while others remain down.
    PointerUp,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub id: PointerId,
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub fn new(id: PointerId, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Index of the pointer the action refers to.
    pub action_index: usize,
    /// Event time in milliseconds on the host's monotonic clock.
    pub time_ms: i64,
    pointers: SmallVec<[Pointer; 2]>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, time_ms: i64, pointer: Pointer) -> Self {
        let mut pointers = SmallVec::new();
        pointers.push(pointer);
        Self {
            kind,
            action_index: 0,
            time_ms,
            pointers,
        }
    }

    pub fn down(id: PointerId, x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Down, time_ms, Pointer::new(id, x, y))
    }

    pub fn move_to(id: PointerId, x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Move, time_ms, Pointer::new(id, x, y))
    }

    pub fn up(id: PointerId, x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Up, time_ms, Pointer::new(id, x, y))
    }

    pub fn cancel(id: PointerId, x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Cancel, time_ms, Pointer::new(id, x, y))
    }

    /// Builds an event from an explicit pointer list.
    ///
    /// Returns `None` when `pointers` is empty or `action_index` is out of range.
    pub fn from_pointers(
        kind: PointerEventKind,
        time_ms: i64,
        action_index: usize,
        pointers: impl IntoIterator<Item = Pointer>,
    ) -> Option<Self> {
        let pointers: SmallVec<[Pointer; 2]> = pointers.into_iter().collect();
        if action_index >= pointers.len() {
            return None;
        }
        Some(Self {
            kind,
            action_index,
            time_ms,
            pointers,
        })
    }

    /// Appends another held pointer to this event.
    pub fn with_pointer(mut self, pointer: Pointer) -> Self {
        self.pointers.push(pointer);
        self
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointers(&self) -> &[Pointer] {
        &self.pointers
    }

    pub fn pointer(&self, index: usize) -> Option<&Pointer> {
        self.pointers.get(index)
    }

    pub fn find_pointer_index(&self, id: PointerId) -> Option<usize> {
        self.pointers.iter().position(|pointer| pointer.id == id)
    }

    /// The pointer the action refers to.
    pub fn action_pointer(&self) -> &Pointer {
        &self.pointers[self.action_index.min(self.pointers.len() - 1)]
    }

    /// The pointer that started the gesture (index 0).
    pub fn primary(&self) -> &Pointer {
        &self.pointers[0]
    }
}
