use crate::surface::{FeatureId, MapSurface};
use cartodesk_panel::{Point, Rectangle};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Selection sub-mode while interaction is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Single-click hit test
    Click,
    /// Rubber-band rectangle, bounding-box intersection on release
    Box,
}

impl SelectionMode {
    /// Parse a mode name from config or commands ("click"/"box")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "click" => Some(SelectionMode::Click),
            "box" => Some(SelectionMode::Box),
            _ => None,
        }
    }
}

/// Interaction state of the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// No feature selection; clicks fall through to the map
    Inactive,
    /// Selecting with the given sub-mode
    Active(SelectionMode),
}

/// Notification emitted by a selection operation.
///
/// The controller knows nothing about panels or toasts; the workspace
/// turns these into dependent-UI updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    /// The selection was replaced or extended and is non-empty
    SelectionChanged { count: usize },
    /// A previously non-empty selection became empty
    SelectionCleared,
}

/// Toggles the map between passive and selecting, and keeps the list of
/// currently selected features in sync with user interaction.
pub struct SelectionController {
    state: SelectionState,

    /// Sub-mode re-entered on the next activation
    last_mode: SelectionMode,

    selected: Vec<FeatureId>,

    /// Layer of the most recently inspected feature (drives the
    /// attributes view); `None` whenever the selection is empty
    inspected_layer: Option<String>,
}

impl SelectionController {
    pub fn new(default_mode: SelectionMode) -> Self {
        Self {
            state: SelectionState::Inactive,
            last_mode: default_mode,
            selected: Vec::new(),
            inspected_layer: None,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SelectionState::Active(_))
    }

    pub fn selected(&self) -> &[FeatureId] {
        &self.selected
    }

    pub fn inspected_layer(&self) -> Option<&str> {
        self.inspected_layer.as_deref()
    }

    /// Flip between inactive and active.
    ///
    /// Activation installs the handler for the last-used sub-mode.
    /// Deactivation removes the handler and clears the selection; the
    /// returned event is `SelectionCleared` (never `SelectionChanged`)
    /// when something was selected.
    pub fn toggle_interaction(&mut self, surface: &mut dyn MapSurface) -> Option<SelectionEvent> {
        match self.state {
            SelectionState::Inactive => {
                debug!("Selection activated in {:?} mode", self.last_mode);
                self.state = SelectionState::Active(self.last_mode);
                surface.attach_interaction(self.last_mode);
                None
            }
            SelectionState::Active(_) => {
                debug!("Selection deactivated");
                self.state = SelectionState::Inactive;
                surface.detach_interaction();
                self.clear_selection()
            }
        }
    }

    /// Switch the sub-mode.
    ///
    /// While active this tears down the previous handler and installs
    /// the new one; switching by itself clears no selection. While
    /// inactive choosing a mode is itself an activation.
    pub fn set_mode(&mut self, surface: &mut dyn MapSurface, mode: SelectionMode) {
        self.last_mode = mode;

        match self.state {
            SelectionState::Active(current) if current != mode => {
                debug!("Selection mode {:?} -> {:?}", current, mode);
                surface.detach_interaction();
                surface.attach_interaction(mode);
                self.state = SelectionState::Active(mode);
            }
            SelectionState::Active(_) => {}
            SelectionState::Inactive => {
                debug!("Selection activated in {:?} mode", mode);
                surface.attach_interaction(mode);
                self.state = SelectionState::Active(mode);
            }
        }
    }

    /// Empty the selection regardless of mode. Safe when already empty.
    pub fn clear_selection(&mut self) -> Option<SelectionEvent> {
        self.inspected_layer = None;

        if self.selected.is_empty() {
            return None;
        }

        self.selected.clear();
        Some(SelectionEvent::SelectionCleared)
    }

    /// Resolve a click to the features at that point.
    ///
    /// A plain click replaces the selection; an extend click unions.
    /// Zero hits leave the selection empty with no notification.
    /// Ignored outside click mode.
    pub fn click_at(
        &mut self,
        surface: &mut dyn MapSurface,
        point: Point,
        extend: bool,
    ) -> Option<SelectionEvent> {
        if self.state != SelectionState::Active(SelectionMode::Click) {
            return None;
        }

        let hits = surface.features_at(point);
        debug!("Click at {:?} hit {} features", point, hits.len());

        if !extend {
            self.selected.clear();
        }

        for id in hits {
            if !self.selected.contains(&id) {
                self.selected.push(id);
            }
        }

        self.after_update(surface)
    }

    /// Complete a box gesture: select every feature whose bounding box
    /// intersects the rectangle, replacing the prior selection. Ignored
    /// outside box mode.
    pub fn box_select(
        &mut self,
        surface: &mut dyn MapSurface,
        rect: Rectangle,
    ) -> Option<SelectionEvent> {
        if self.state != SelectionState::Active(SelectionMode::Box) {
            return None;
        }

        self.selected = surface.features_in(rect);
        debug!("Box {:?} selected {} features", rect, self.selected.len());

        self.after_update(surface)
    }

    fn after_update(&mut self, surface: &dyn MapSurface) -> Option<SelectionEvent> {
        match self.selected.first() {
            Some(&first) => {
                self.inspected_layer = surface.feature_layer(first).map(|s| s.to_string());
                Some(SelectionEvent::SelectionChanged {
                    count: self.selected.len(),
                })
            }
            None => {
                self.inspected_layer = None;
                None
            }
        }
    }
}
