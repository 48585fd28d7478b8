//! Input and offset primitives shared by dragpanel's gesture and fling layers.

mod offset_controller;
mod panel;
mod pointer;
mod velocity_tracker;
mod view_configuration;

pub use offset_controller::OffsetController;
pub use panel::{DraggablePanel, ViewOffset};
pub use pointer::{Pointer, PointerEvent, PointerEventKind, PointerId};
pub use velocity_tracker::{AxisVelocityTracker, VelocityTracker, ASSUME_STOPPED_MS};
pub use view_configuration::{
    ConfigError, ViewConfiguration, ViewConfigurationBuilder, DEFAULT_MAX_FLING_VELOCITY,
    DEFAULT_TOUCH_SLOP,
};
