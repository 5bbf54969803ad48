use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeybindingError {
    #[error("Invalid keybinding format: {0}")]
    InvalidFormat(String),
    #[error("Unknown modifier: {0}")]
    UnknownModifier(String),
    #[error("Unknown key: {0}")]
    UnknownKey(String),
}

/// Modifier keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// Super/Logo/Windows key
    Super,
    /// Shift key
    Shift,
    /// Control key
    Ctrl,
    /// Alt key
    Alt,
}

/// A key as delivered by the front-end event boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Letter or digit
    Char(char),
    /// Function key F1-F12
    Function(u8),
    Space,
    Return,
    Escape,
    Tab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
}

/// Parsed keybinding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keybinding {
    pub modifiers: Vec<Modifier>,
    pub key: Key,
}

impl Keybinding {
    /// Parse a keybinding string like "Ctrl+Shift+l" into a Keybinding
    pub fn parse(s: &str) -> Result<Self, KeybindingError> {
        let parts: Vec<&str> = s.split('+').map(|p| p.trim()).collect();

        if parts.is_empty() || parts[0].is_empty() {
            return Err(KeybindingError::InvalidFormat(
                "Empty keybinding string".to_string(),
            ));
        }

        let mut modifiers = Vec::new();

        // All but the last part are modifiers
        for part in &parts[..parts.len() - 1] {
            let modifier = match part.to_lowercase().as_str() {
                "super" | "mod" | "logo" | "win" => Modifier::Super,
                "shift" => Modifier::Shift,
                "ctrl" | "control" => Modifier::Ctrl,
                "alt" => Modifier::Alt,
                _ => return Err(KeybindingError::UnknownModifier(part.to_string())),
            };
            modifiers.push(modifier);
        }

        // Last part is the key
        let key_str = parts[parts.len() - 1];
        let key = string_to_key(key_str)
            .ok_or_else(|| KeybindingError::UnknownKey(key_str.to_string()))?;

        Ok(Keybinding { modifiers, key })
    }

    /// Check if this keybinding matches the given input
    pub fn matches(
        &self,
        key: Key,
        super_pressed: bool,
        shift_pressed: bool,
        ctrl_pressed: bool,
        alt_pressed: bool,
    ) -> bool {
        if self.key != key {
            return false;
        }

        let has_super = self.modifiers.contains(&Modifier::Super);
        let has_shift = self.modifiers.contains(&Modifier::Shift);
        let has_ctrl = self.modifiers.contains(&Modifier::Ctrl);
        let has_alt = self.modifiers.contains(&Modifier::Alt);

        has_super == super_pressed
            && has_shift == shift_pressed
            && has_ctrl == ctrl_pressed
            && has_alt == alt_pressed
    }
}

/// Action that a keybinding triggers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Quit the workspace
    Quit,
    /// Minimize/restore a panel by id
    TogglePanel(String),
    /// Collapse/expand a panel by id
    CollapsePanel(String),
    /// Toggle feature selection on/off
    ToggleSelection,
    /// Switch selection sub-mode ("click" or "box")
    SetSelectionMode(String),
    /// Clear the current feature selection
    ClearSelection,
    /// Focus the layer catalog search box
    FocusCatalog,
    /// Reload configuration
    ReloadConfig,
}

/// Keybinding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_keybindings")]
    pub bindings: HashMap<String, Action>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            bindings: default_keybindings(),
        }
    }
}

impl KeybindingsConfig {
    /// Get parsed keybindings with their actions
    pub fn parse_all(&self) -> HashMap<Keybinding, Action> {
        let mut result = HashMap::new();

        for (key_str, action) in &self.bindings {
            match Keybinding::parse(key_str) {
                Ok(keybinding) => {
                    result.insert(keybinding, action.clone());
                }
                Err(e) => {
                    tracing::warn!("Failed to parse keybinding '{}': {}", key_str, e);
                }
            }
        }

        result
    }
}

/// Convert a string to a Key
fn string_to_key(s: &str) -> Option<Key> {
    let lower = s.to_lowercase();

    // Single letters and digits
    if lower.len() == 1 {
        let ch = lower.chars().next()?;
        if ch.is_ascii_alphanumeric() {
            return Some(Key::Char(ch));
        }
    }

    // Function keys
    if let Some(num) = lower.strip_prefix('f') {
        if let Ok(n) = num.parse::<u8>() {
            if (1..=12).contains(&n) {
                return Some(Key::Function(n));
            }
        }
    }

    let key = match lower.as_str() {
        "space" => Key::Space,
        "return" | "enter" => Key::Return,
        "escape" | "esc" => Key::Escape,
        "tab" => Key::Tab,
        "backspace" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "left" => Key::Left,
        "right" => Key::Right,
        "up" => Key::Up,
        "down" => Key::Down,
        _ => return None,
    };

    Some(key)
}

/// Default keybindings
fn default_keybindings() -> HashMap<String, Action> {
    let mut bindings = HashMap::new();

    // Core
    bindings.insert("Ctrl+Shift+q".to_string(), Action::Quit);
    bindings.insert("Ctrl+Shift+r".to_string(), Action::ReloadConfig);

    // Panels
    bindings.insert("Ctrl+l".to_string(), Action::TogglePanel("layers".to_string()));
    bindings.insert("Ctrl+e".to_string(), Action::TogglePanel("legend".to_string()));
    bindings.insert(
        "Ctrl+a".to_string(),
        Action::TogglePanel("attributes".to_string()),
    );
    bindings.insert("Ctrl+t".to_string(), Action::TogglePanel("tools".to_string()));
    bindings.insert(
        "Ctrl+i".to_string(),
        Action::TogglePanel("assistant".to_string()),
    );
    bindings.insert(
        "Ctrl+Shift+l".to_string(),
        Action::CollapsePanel("layers".to_string()),
    );

    // Selection
    bindings.insert("Ctrl+s".to_string(), Action::ToggleSelection);
    bindings.insert(
        "Ctrl+1".to_string(),
        Action::SetSelectionMode("click".to_string()),
    );
    bindings.insert(
        "Ctrl+2".to_string(),
        Action::SetSelectionMode("box".to_string()),
    );
    bindings.insert("Escape".to_string(), Action::ClearSelection);

    // Catalog
    bindings.insert("Ctrl+f".to_string(), Action::FocusCatalog);

    bindings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_keybinding() {
        let kb = Keybinding::parse("Ctrl+l").unwrap();
        assert_eq!(kb.modifiers, vec![Modifier::Ctrl]);
        assert_eq!(kb.key, Key::Char('l'));
    }

    #[test]
    fn test_parse_multiple_modifiers() {
        let kb = Keybinding::parse("Ctrl+Shift+q").unwrap();
        assert_eq!(kb.modifiers, vec![Modifier::Ctrl, Modifier::Shift]);
        assert_eq!(kb.key, Key::Char('q'));
    }

    #[test]
    fn test_parse_function_key() {
        let kb = Keybinding::parse("F5").unwrap();
        assert_eq!(kb.modifiers, vec![]);
        assert_eq!(kb.key, Key::Function(5));
    }

    #[test]
    fn test_parse_bare_key() {
        let kb = Keybinding::parse("Escape").unwrap();
        assert_eq!(kb.modifiers, vec![]);
        assert_eq!(kb.key, Key::Escape);
    }

    #[test]
    fn test_parse_invalid_modifier() {
        let result = Keybinding::parse("Invalid+d");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_invalid_key() {
        let result = Keybinding::parse("Ctrl+invalid");
        assert!(result.is_err());
    }

    #[test]
    fn test_keybinding_matches() {
        let kb = Keybinding::parse("Ctrl+Shift+q").unwrap();
        assert!(kb.matches(Key::Char('q'), false, true, true, false));
        assert!(!kb.matches(Key::Char('q'), false, false, true, false));
        assert!(!kb.matches(Key::Char('q'), true, true, true, false));
        assert!(!kb.matches(Key::Char('d'), false, true, true, false));
    }

    #[test]
    fn test_default_keybindings() {
        let config = KeybindingsConfig::default();
        assert!(!config.bindings.is_empty());
        assert_eq!(
            config.bindings.get("Ctrl+s"),
            Some(&Action::ToggleSelection)
        );
    }

    #[test]
    fn test_parse_all_default_bindings() {
        let config = KeybindingsConfig::default();
        let parsed = config.parse_all();

        // Every default binding should parse
        assert_eq!(parsed.len(), config.bindings.len());

        let kb = Keybinding::parse("Ctrl+l").unwrap();
        assert_eq!(parsed.get(&kb), Some(&Action::TogglePanel("layers".to_string())));
    }
}
