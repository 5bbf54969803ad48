use crate::workspace::Workspace;
use cartodesk_config::{Action, Key};
use cartodesk_map::{MapSurface, SelectionMode};
use tracing::{debug, warn};

/// Modifier state delivered with a key event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub super_key: bool,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// Dispatch a key press against the configured bindings.
/// Returns true when the key was consumed by a workspace action.
pub fn handle_key<S: MapSurface>(
    workspace: &mut Workspace<S>,
    key: Key,
    modifiers: Modifiers,
) -> bool {
    // While the catalog search box is open it gets key input first
    if workspace.search.is_some() {
        return handle_search_input(workspace, key, modifiers);
    }

    let action = workspace
        .bindings
        .iter()
        .find(|(binding, _)| {
            binding.matches(
                key,
                modifiers.super_key,
                modifiers.shift,
                modifiers.ctrl,
                modifiers.alt,
            )
        })
        .map(|(_, action)| action.clone());

    let Some(action) = action else {
        return false;
    };

    debug!("Key {:?} triggered {:?}", key, action);

    match action {
        Action::Quit => {
            workspace.teardown();
        }
        Action::TogglePanel(id) => {
            workspace.panels.toggle_minimize(&id);
        }
        Action::CollapsePanel(id) => {
            workspace.panels.toggle_collapse(&id);
        }
        Action::ToggleSelection => {
            workspace.toggle_selection();
        }
        Action::SetSelectionMode(mode) => match SelectionMode::parse(&mode) {
            Some(mode) => workspace.set_selection_mode(mode),
            None => warn!("Unknown selection mode '{}' in keybinding", mode),
        },
        Action::ClearSelection => {
            workspace.clear_selection();
        }
        Action::FocusCatalog => {
            workspace.toggle_catalog_search();
        }
        Action::ReloadConfig => {
            workspace.reload_config();
        }
    }

    true
}

/// Handle key input while the catalog search box is open
fn handle_search_input<S: MapSurface>(
    workspace: &mut Workspace<S>,
    key: Key,
    modifiers: Modifiers,
) -> bool {
    // Escape: close the search box
    if key == Key::Escape {
        workspace.toggle_catalog_search();
        return true;
    }

    // Enter: toggle visibility of the highlighted layer, then close
    if key == Key::Return {
        let selected = workspace
            .search
            .as_ref()
            .and_then(|search| search.selected())
            .map(str::to_string);

        if let Some(name) = selected {
            let visible = workspace.catalog.get(&name).is_some_and(|l| l.visible);
            workspace.catalog.set_visibility(&name, !visible);
            debug!("Search toggled visibility of '{}'", name);
        }

        workspace.toggle_catalog_search();
        return true;
    }

    // The binding that opened the search box also closes it
    if modifiers.ctrl || modifiers.super_key || modifiers.alt {
        let closes = workspace.bindings.iter().any(|(binding, action)| {
            *action == Action::FocusCatalog
                && binding.matches(
                    key,
                    modifiers.super_key,
                    modifiers.shift,
                    modifiers.ctrl,
                    modifiers.alt,
                )
        });

        if closes {
            workspace.toggle_catalog_search();
            return true;
        }
    }

    let Some(search) = workspace.search.as_mut() else {
        return false;
    };

    match key {
        Key::Up => {
            search.select_previous();
            true
        }
        Key::Down => {
            search.select_next();
            true
        }
        Key::Backspace => {
            search.pop_char(&workspace.catalog);
            true
        }
        Key::Char(ch) if !modifiers.ctrl && !modifiers.super_key && !modifiers.alt => {
            search.push_char(&workspace.catalog, ch);
            debug!("Catalog query: {}", search.query());
            true
        }
        _ => false,
    }
}
