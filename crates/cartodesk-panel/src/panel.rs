use crate::geometry::Point;

/// Presentation state of one floating workspace panel.
///
/// Panels are created once from configuration and live for the whole
/// session; the renderer collaborator reads this state, the registry
/// mutates it.
#[derive(Debug, Clone)]
pub struct Panel {
    /// Stable identifier, unique among panels
    pub id: String,

    /// Title shown in the panel header
    pub title: String,

    /// Minimized panels render nothing
    pub minimized: bool,

    /// Collapsed panels render only their header
    pub collapsed: bool,

    /// Top-left corner, relative to the container top-left
    pub position: Point,

    /// Stacking order; higher draws on top
    pub z_index: u64,
}

impl Panel {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            minimized: false,
            collapsed: false,
            position: Point::default(),
            z_index: 0,
        }
    }

    /// Visible means the renderer draws at least the header
    pub fn is_visible(&self) -> bool {
        !self.minimized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_panel() {
        let panel = Panel::new("legend", "Legend");
        assert_eq!(panel.id, "legend");
        assert!(!panel.minimized);
        assert!(!panel.collapsed);
        assert!(panel.is_visible());
        assert_eq!(panel.z_index, 0);
    }

    #[test]
    fn test_minimized_not_visible() {
        let mut panel = Panel::new("tools", "Tools");
        panel.minimized = true;
        assert!(!panel.is_visible());
    }
}
