pub mod config;
pub mod keybindings;
pub mod theme;

pub use config::{
    CatalogConfig, Config, GeneralConfig, PanelEntry, PanelsConfig, SelectionConfig,
    ServicesConfig,
};
pub use keybindings::{Action, Key, Keybinding, KeybindingError, KeybindingsConfig, Modifier};
pub use theme::{Color, Theme};
