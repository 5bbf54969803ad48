use cartodesk_map::{LayerDescriptor, SelectionMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("could not interpret assistant action: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A workspace action produced by the natural-language assistant.
///
/// The LLM collaborator translates the user's prompt into one of these
/// as a JSON object tagged with `action`; the core only deserializes
/// and applies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WorkspaceCommand {
    SetLayerVisibility { layer: String, visible: bool },
    SetLayerOpacity { layer: String, opacity: f32 },
    AddLayer { layer: LayerDescriptor },
    RemoveLayer { layer: String },
    TogglePanel { panel: String },
    SetSelectionMode { mode: SelectionMode },
    ClearSelection,
}

/// Parse a JSON action payload into a command
pub fn parse_command(json: &str) -> Result<WorkspaceCommand, CommandError> {
    Ok(serde_json::from_str(json)?)
}
