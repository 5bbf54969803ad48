use crate::commands::{parse_command, WorkspaceCommand};
use crate::notify::Notifier;
use crate::services::ServiceError;
use cartodesk_catalog::{CatalogState, LayerCatalog};
use cartodesk_config::{Action, Config, Keybinding, Theme};
use cartodesk_map::{
    LayerDescriptor, MapSurface, SelectionController, SelectionEvent, SelectionMode,
};
use cartodesk_panel::{DragController, PanelRegistry, Point};
use std::collections::HashMap;
use tracing::{debug, info};

/// Panel auto-restored whenever a new selection arrives
pub const ATTRIBUTES_PANEL: &str = "attributes";

/// Panel hosting the layer catalog search box
pub const LAYERS_PANEL: &str = "layers";

/// The whole map workspace: panel state, drag gesture, selection,
/// layer catalog, and notifications, wired together over an opaque map
/// surface.
///
/// Single-owner, single-thread state; every mutation happens in a
/// synchronous event handler on the UI thread.
pub struct Workspace<S: MapSurface> {
    pub config: Config,
    pub theme: Theme,

    pub panels: PanelRegistry,
    pub drag: DragController,

    pub selection: SelectionController,
    pub surface: S,

    pub catalog: LayerCatalog,

    /// Search box over the catalog; `Some` while it has key focus
    pub search: Option<CatalogState>,

    pub notifier: Notifier,

    /// Parsed keybindings
    pub bindings: HashMap<Keybinding, Action>,

    /// Rubber-band origin while a box gesture is in progress
    pub(crate) rubber_band: Option<Point>,

    /// Layer discovery in flight
    discovery_pending: bool,

    /// Fencing counter for discovery requests; stale completions are dropped
    discovery_generation: u64,

    /// Liveness flag checked before applying late network results
    mounted: bool,

    /// Cleared by the quit action
    pub running: bool,
}

impl<S: MapSurface> Workspace<S> {
    pub fn new(config: Config, surface: S) -> Self {
        info!("Creating workspace with {} panels", config.panels.entries.len());

        let theme = config.get_theme();
        let panels = PanelRegistry::from_config(&config.panels.entries, &config.general);
        let bindings = config.keybindings.parse_all();

        let default_mode =
            SelectionMode::parse(&config.selection.default_mode).unwrap_or(SelectionMode::Click);

        Self {
            config,
            theme,
            panels,
            drag: DragController::new(),
            selection: SelectionController::new(default_mode),
            surface,
            catalog: LayerCatalog::new(),
            search: None,
            notifier: Notifier::new(),
            bindings,
            rubber_band: None,
            discovery_pending: false,
            discovery_generation: 0,
            mounted: true,
            running: true,
        }
    }

    /// React to a selection notification: a new non-empty selection
    /// restores the attributes panel so the hit features are visible.
    /// The selection controller itself knows nothing about panels.
    pub fn handle_selection_event(&mut self, event: Option<SelectionEvent>) {
        match event {
            Some(SelectionEvent::SelectionChanged { count }) => {
                debug!("Selection changed: {} features", count);
                self.panels.restore(ATTRIBUTES_PANEL);
            }
            Some(SelectionEvent::SelectionCleared) => {
                self.notifier.info("Selection cleared");
            }
            None => {}
        }
    }

    /// Flip selection on/off
    pub fn toggle_selection(&mut self) {
        let event = self.selection.toggle_interaction(&mut self.surface);
        self.rubber_band = None;
        self.handle_selection_event(event);
    }

    /// Switch selection sub-mode
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selection.set_mode(&mut self.surface, mode);
        self.rubber_band = None;
    }

    /// Empty the current selection
    pub fn clear_selection(&mut self) {
        let event = self.selection.clear_selection();
        self.handle_selection_event(event);
    }

    /// Open the catalog search box (restoring and raising the layers
    /// panel it lives in), or close it if it is already open. While
    /// open, key input is routed into the search box.
    pub fn toggle_catalog_search(&mut self) {
        if self.search.is_some() {
            debug!("Closing catalog search");
            self.search = None;
            return;
        }

        debug!("Opening catalog search");
        self.panels.restore(LAYERS_PANEL);
        self.panels.bring_to_front(LAYERS_PANEL);
        self.search = Some(CatalogState::new(&self.catalog, self.config.catalog.max_results));
    }

    pub fn search_open(&self) -> bool {
        self.search.is_some()
    }

    /// Apply an assistant command
    pub fn apply_command(&mut self, command: WorkspaceCommand) {
        debug!("Applying command {:?}", command);

        match command {
            WorkspaceCommand::SetLayerVisibility { layer, visible } => {
                if self.catalog.get(&layer).is_none() {
                    self.notifier.warning(format!("No layer named '{}'", layer));
                    return;
                }
                self.catalog.set_visibility(&layer, visible);
            }
            WorkspaceCommand::SetLayerOpacity { layer, opacity } => {
                match self.catalog.get_mut(&layer) {
                    Some(descriptor) => descriptor.set_opacity(opacity),
                    None => self.notifier.warning(format!("No layer named '{}'", layer)),
                }
            }
            WorkspaceCommand::AddLayer { layer } => {
                self.notifier.info(format!("Added layer '{}'", layer.title));
                self.catalog.add(layer);
            }
            WorkspaceCommand::RemoveLayer { layer } => {
                if self.catalog.remove(&layer).is_none() {
                    self.notifier.warning(format!("No layer named '{}'", layer));
                }
            }
            WorkspaceCommand::TogglePanel { panel } => {
                self.panels.toggle_minimize(&panel);
            }
            WorkspaceCommand::SetSelectionMode { mode } => {
                self.set_selection_mode(mode);
            }
            WorkspaceCommand::ClearSelection => {
                self.clear_selection();
            }
        }
    }

    /// Apply a raw JSON action payload from the assistant collaborator.
    /// Malformed payloads become a toast, never a state change.
    pub fn apply_command_json(&mut self, json: &str) {
        match parse_command(json) {
            Ok(command) => self.apply_command(command),
            Err(e) => self.notifier.error(e.to_string()),
        }
    }

    /// Start a layer-discovery round against the configured services.
    /// Returns the generation the eventual completion must carry.
    pub fn begin_layer_discovery(&mut self) -> u64 {
        self.discovery_generation += 1;
        self.discovery_pending = true;
        debug!("Layer discovery {} started", self.discovery_generation);
        self.discovery_generation
    }

    /// Apply the outcome of a discovery request.
    ///
    /// Results arriving after teardown are ignored, and results from a
    /// superseded request are dropped so a slow early response cannot
    /// overwrite a newer one. Errors become a toast plus a loading-flag
    /// reset; the rest of the workspace state is untouched.
    pub fn complete_layer_discovery(
        &mut self,
        generation: u64,
        result: Result<Vec<LayerDescriptor>, ServiceError>,
    ) {
        if !self.mounted {
            debug!("Dropping discovery result after teardown");
            return;
        }

        if generation != self.discovery_generation {
            debug!(
                "Dropping stale discovery result (generation {} != {})",
                generation, self.discovery_generation
            );
            return;
        }

        self.discovery_pending = false;

        match result {
            Ok(layers) => {
                let count = layers.len();
                for layer in layers {
                    self.catalog.add(layer);
                }
                self.notifier.info(format!("Discovered {} layers", count));
            }
            Err(e) => {
                self.notifier.error(format!("Layer discovery failed: {}", e));
            }
        }
    }

    pub fn discovery_pending(&self) -> bool {
        self.discovery_pending
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Mark the workspace as torn down; late network completions are
    /// ignored from this point on.
    pub fn teardown(&mut self) {
        info!("Workspace teardown");
        self.mounted = false;
        self.running = false;
    }

    /// Re-read configuration from disk. Panel ids are fixed for the
    /// session, so only layout constants, keybindings, and service
    /// endpoints take effect.
    pub fn reload_config(&mut self) {
        match Config::load() {
            Ok(config) => {
                self.bindings = config.keybindings.parse_all();
                self.theme = config.get_theme();
                self.config = config;
                self.notifier.info("Configuration reloaded");
            }
            Err(e) => {
                self.notifier.error(format!("Failed to reload config: {:#}", e));
            }
        }
    }
}
