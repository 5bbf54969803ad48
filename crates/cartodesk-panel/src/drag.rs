use crate::geometry::{BoundsProvider, Offset, Point};
use crate::registry::PanelRegistry;
use tracing::debug;

/// State for a pointer-drag gesture on a panel.
///
/// One shared slot instead of per-panel flags: only one panel can be
/// dragged at a time, and pointer-move handling never has to scan the
/// registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState {
    /// Dragging a panel by its header
    Moving {
        panel: String,
        /// Pointer offset from the panel's top-left corner at grab time
        grab_offset: Offset,
        /// Container origin sampled at drag start; re-queried on every
        /// begin so intervening layout shifts don't skew positions
        container_origin: Point,
    },
    /// No drag in progress
    Idle,
}

/// Translates raw pointer events into position updates for the panel
/// being dragged.
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    /// Start dragging a panel.
    ///
    /// Ignored when the panel id is unknown or the panel has no
    /// renderable bounds yet. Brings the panel to front immediately.
    pub fn begin(
        &mut self,
        registry: &mut PanelRegistry,
        provider: &dyn BoundsProvider,
        id: &str,
        pointer: Point,
    ) {
        if registry.get(id).is_none() {
            debug!("begin drag: unknown panel '{}'", id);
            return;
        }

        let Some(bounds) = provider.panel_bounds(id) else {
            debug!("begin drag: panel '{}' has no render bounds", id);
            return;
        };

        let container_origin = provider.container_bounds().origin();
        let grab_offset = pointer - bounds.origin();

        debug!("Begin drag of '{}' with offset {:?}", id, grab_offset);

        self.state = DragState::Moving {
            panel: id.to_string(),
            grab_offset,
            container_origin,
        };

        registry.bring_to_front(id);
    }

    /// Apply a pointer-move event to the dragged panel.
    ///
    /// Each event fully recomputes the position from the current pointer
    /// coordinates, so dropped or reordered frames cannot accumulate
    /// error. No-op when no drag is active. O(1).
    pub fn pointer_moved(&self, registry: &mut PanelRegistry, pointer: Point) {
        let DragState::Moving {
            panel,
            grab_offset,
            container_origin,
        } = &self.state
        else {
            return;
        };

        if let Some(panel) = registry.get_mut(panel) {
            panel.position = Point::new(
                pointer.x - container_origin.x - grab_offset.dx,
                pointer.y - container_origin.y - grab_offset.dy,
            );
        }
    }

    /// Finish the current drag. Safe to call with no drag active.
    pub fn end(&mut self) {
        if self.state != DragState::Idle {
            debug!("End drag");
        }
        self.state = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Id of the panel currently being dragged
    pub fn dragged_panel(&self) -> Option<&str> {
        match &self.state {
            DragState::Moving { panel, .. } => Some(panel),
            DragState::Idle => None,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}
