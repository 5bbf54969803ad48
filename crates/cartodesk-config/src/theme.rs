/// Workspace color palette, based on https://www.nordtheme.com/
///
/// The core never draws anything; the renderer collaborator reads these
/// colors when painting panel chrome, selection highlights, and toasts.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to f32 array for rendering (0.0-1.0 range)
    pub fn to_f32_array(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Convert to a CSS hex string like "#2e3440"
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Theme used for panel chrome and map affordances
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Panel body background
    pub panel_background: Color,

    /// Header of the topmost (focused) panel
    pub panel_header_focused: Color,

    /// Header of all other panels
    pub panel_header_unfocused: Color,

    /// Panel title text
    pub panel_title: Color,

    /// Rubber-band rectangle fill during box selection
    pub selection_fill: Color,

    /// Rubber-band rectangle outline and selected-feature highlight
    pub selection_outline: Color,

    /// Info toast accent
    pub toast_info: Color,

    /// Warning toast accent
    pub toast_warning: Color,

    /// Error toast accent
    pub toast_error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Polar Night
            panel_background: Color::rgb(0x2e, 0x34, 0x40),
            panel_header_unfocused: Color::rgb(0x3b, 0x42, 0x52),

            // Frost
            panel_header_focused: Color::rgb(0x5e, 0x81, 0xac),
            selection_outline: Color::rgb(0x88, 0xc0, 0xd0),
            selection_fill: Color::rgba(0x88, 0xc0, 0xd0, 0x40),
            toast_info: Color::rgb(0x81, 0xa1, 0xc1),

            // Snow Storm
            panel_title: Color::rgb(0xec, 0xef, 0xf4),

            // Aurora
            toast_warning: Color::rgb(0xeb, 0xcb, 0x8b),
            toast_error: Color::rgb(0xbf, 0x61, 0x6a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_f32() {
        let c = Color::rgb(255, 0, 127);
        let arr = c.to_f32_array();
        assert_eq!(arr[0], 1.0);
        assert_eq!(arr[1], 0.0);
        assert_eq!(arr[3], 1.0);
    }

    #[test]
    fn test_color_to_hex() {
        let c = Color::rgb(0x2e, 0x34, 0x40);
        assert_eq!(c.to_hex(), "#2e3440");
    }

    #[test]
    fn test_selection_fill_translucent() {
        let theme = Theme::default();
        assert!(theme.selection_fill.a < 255);
    }
}
