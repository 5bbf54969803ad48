use crate::workspace::Workspace;
use cartodesk_map::{MapSurface, SelectionMode, SelectionState};
use cartodesk_panel::{BoundsProvider, Point, Rectangle};
use tracing::debug;

/// Pointer buttons the workspace reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
}

/// Whether the point falls in a panel's header strip (the draggable area)
fn is_in_header(bounds: Rectangle, header_height: u32, point: Point) -> bool {
    bounds.contains_point(point) && point.y < bounds.y + header_height as i32
}

/// Handle a pointer button press/release.
///
/// A press is routed to the topmost panel under the cursor first:
/// header presses start a drag, body presses just raise the panel.
/// Presses on the bare map feed the selection controller. `extend`
/// carries the modifier-extend semantic for click selection.
pub fn handle_pointer_button<S: MapSurface>(
    workspace: &mut Workspace<S>,
    provider: &dyn BoundsProvider,
    button: PointerButton,
    pressed: bool,
    position: Point,
    extend: bool,
) {
    if button != PointerButton::Left {
        return;
    }

    if pressed {
        // Panels occlude the map
        if let Some(panel_id) = workspace
            .panels
            .panel_at(provider, position)
            .map(|p| p.id.clone())
        {
            workspace.panels.bring_to_front(&panel_id);

            let header_height = workspace.config.general.header_height;
            if provider
                .panel_bounds(&panel_id)
                .is_some_and(|bounds| is_in_header(bounds, header_height, position))
            {
                debug!("Starting drag of panel '{}'", panel_id);
                workspace
                    .drag
                    .begin(&mut workspace.panels, provider, &panel_id, position);
            }
            return;
        }

        // Bare map press: selection input
        match workspace.selection.state() {
            SelectionState::Active(SelectionMode::Click) => {
                let event = workspace
                    .selection
                    .click_at(&mut workspace.surface, position, extend);
                workspace.handle_selection_event(event);
            }
            SelectionState::Active(SelectionMode::Box) => {
                debug!("Rubber band anchored at {:?}", position);
                workspace.rubber_band = Some(position);
            }
            SelectionState::Inactive => {}
        }
    } else {
        // Button released: finish whichever gesture was in flight
        if workspace.drag.is_dragging() {
            workspace.drag.end();
            return;
        }

        if let Some(origin) = workspace.rubber_band.take() {
            let rect = Rectangle::from_corners(origin, position);
            debug!("Rubber band released over {:?}", rect);
            let event = workspace.selection.box_select(&mut workspace.surface, rect);
            workspace.handle_selection_event(event);
        }
    }
}

/// Handle pointer motion: only the active drag cares
pub fn handle_pointer_motion<S: MapSurface>(workspace: &mut Workspace<S>, position: Point) {
    workspace.drag.pointer_moved(&mut workspace.panels, position);
}
