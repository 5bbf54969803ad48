use crate::keybindings::KeybindingsConfig;
use crate::theme::Theme;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub panels: PanelsConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub services: ServicesConfig,

    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// General workspace settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Panel width in pixels (used for the initial layout)
    #[serde(default = "default_panel_width")]
    pub panel_width: u32,

    /// Padding between panels and container edges in pixels
    #[serde(default = "default_panel_padding")]
    pub panel_padding: u32,

    /// Panel header height in pixels (the draggable strip)
    #[serde(default = "default_header_height")]
    pub header_height: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            panel_width: default_panel_width(),
            panel_padding: default_panel_padding(),
            header_height: default_header_height(),
        }
    }
}

fn default_panel_width() -> u32 {
    320
}

fn default_panel_padding() -> u32 {
    16
}

fn default_header_height() -> u32 {
    32
}

/// A single configured panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelEntry {
    /// Stable panel identifier (map key)
    pub id: String,

    /// Human-readable title shown in the panel header
    pub title: String,

    /// Start this panel minimized
    #[serde(default)]
    pub start_minimized: bool,
}

impl PanelEntry {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            start_minimized: false,
        }
    }
}

/// Panels configuration
///
/// Panel ids are fixed at configuration time; the workspace never creates or
/// destroys panels at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelsConfig {
    #[serde(default = "default_panel_entries")]
    pub entries: Vec<PanelEntry>,
}

impl Default for PanelsConfig {
    fn default() -> Self {
        Self {
            entries: default_panel_entries(),
        }
    }
}

fn default_panel_entries() -> Vec<PanelEntry> {
    vec![
        PanelEntry::new("layers", "Layers"),
        PanelEntry::new("legend", "Legend"),
        PanelEntry::new("attributes", "Attributes"),
        PanelEntry::new("tools", "Tools"),
        PanelEntry::new("assistant", "AI Assistant"),
    ]
}

/// Selection controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Sub-mode entered on first activation ("click" or "box")
    #[serde(default = "default_selection_mode")]
    pub default_mode: String,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            default_mode: default_selection_mode(),
        }
    }
}

fn default_selection_mode() -> String {
    "click".to_string()
}

/// Layer catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Maximum number of search results to show
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    10
}

/// Remote service endpoints (consumed by the excluded HTTP collaborators)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// GeoServer base URL for WMS/WFS capability requests
    #[serde(default = "default_geoserver_url")]
    pub geoserver_url: String,

    /// Overpass API endpoint for OSM extracts
    #[serde(default = "default_overpass_url")]
    pub overpass_url: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            geoserver_url: default_geoserver_url(),
            overpass_url: default_overpass_url(),
        }
    }
}

fn default_geoserver_url() -> String {
    "http://localhost:8080/geoserver".to_string()
}

fn default_overpass_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            panels: PanelsConfig::default(),
            selection: SelectionConfig::default(),
            catalog: CatalogConfig::default(),
            services: ServicesConfig::default(),
            keybindings: KeybindingsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    /// (~/.config/cartodesk/config.toml)
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        Self::load_from_path(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        info!("Successfully loaded config from {:?}", path);
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let contents =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        info!("Successfully saved config to {:?}", path);
        Ok(())
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("cartodesk").join("config.toml"))
    }

    /// Create a default config file if it doesn't exist
    pub fn create_default_if_missing() -> Result<()> {
        let path = Self::config_path()?;

        if path.exists() {
            debug!("Config file already exists at {:?}", path);
            return Ok(());
        }

        info!("Creating default config file at {:?}", path);
        let config = Self::default();
        config.save()?;

        Ok(())
    }

    /// Get the theme (fixed palette for now)
    pub fn get_theme(&self) -> Theme {
        Theme::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.panel_width, 320);
        assert_eq!(config.general.panel_padding, 16);
        assert_eq!(config.panels.entries.len(), 5);
        assert_eq!(config.selection.default_mode, "click");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[selection]"));
        assert!(!toml_str.is_empty());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
[general]
panel_width = 280
header_height = 28

[catalog]
max_results = 20

[[panels.entries]]
id = "layers"
title = "Layers"

[[panels.entries]]
id = "attributes"
title = "Attributes"
start_minimized = true
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.panel_width, 280);
        assert_eq!(config.general.header_height, 28);
        assert_eq!(config.catalog.max_results, 20);
        assert_eq!(config.panels.entries.len(), 2);
        assert!(config.panels.entries[1].start_minimized);
    }

    #[test]
    fn test_partial_config() {
        // Missing sections fall back to defaults
        let toml_str = r#"
[general]
panel_padding = 8
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.panel_padding, 8);
        assert_eq!(config.general.panel_width, 320); // Default
        assert_eq!(config.panels.entries.len(), 5); // Default
    }
}
