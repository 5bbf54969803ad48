pub mod drag;
pub mod geometry;
pub mod panel;
pub mod registry;

pub use drag::{DragController, DragState};
pub use geometry::{BoundsProvider, Offset, Point, Rectangle};
pub use panel::Panel;
pub use registry::PanelRegistry;
