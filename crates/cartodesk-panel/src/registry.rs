use crate::geometry::{BoundsProvider, Point};
use crate::panel::Panel;
use cartodesk_config::{GeneralConfig, PanelEntry};
use indexmap::IndexMap;
use tracing::{debug, info};

/// Owns the open/closed, collapsed, position, and stacking state for the
/// fixed set of configured panels.
///
/// All operations on an unknown panel id are silent no-ops; this is a UI
/// convenience layer, not a validating boundary.
pub struct PanelRegistry {
    /// Panels keyed by id, in configuration order
    panels: IndexMap<String, Panel>,

    /// Shared z-order counter; only ever increases, so no two
    /// bring-to-front operations produce the same value
    z_counter: u64,
}

impl PanelRegistry {
    /// Create all panels from configuration with the initial layout:
    /// panels line up left to right along the container top edge,
    /// `panel_width` wide with `panel_padding` between them.
    pub fn from_config(entries: &[PanelEntry], general: &GeneralConfig) -> Self {
        info!("Creating panel registry with {} panels", entries.len());

        let mut panels = IndexMap::new();
        let step = (general.panel_width + general.panel_padding) as i32;
        let padding = general.panel_padding as i32;

        for (index, entry) in entries.iter().enumerate() {
            let mut panel = Panel::new(&entry.id, &entry.title);
            panel.position = Point::new(padding + index as i32 * step, padding);
            panel.minimized = entry.start_minimized;
            panel.z_index = index as u64;

            debug!("Created panel '{}' at {:?}", panel.id, panel.position);
            panels.insert(entry.id.clone(), panel);
        }

        let z_counter = panels.len() as u64;

        Self { panels, z_counter }
    }

    /// Get a panel by id
    pub fn get(&self, id: &str) -> Option<&Panel> {
        self.panels.get(id)
    }

    /// Get a mutable panel by id
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Panel> {
        self.panels.get_mut(id)
    }

    /// Iterate over all panels in configuration order
    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.values()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Current value of the shared z-order counter
    pub fn z_counter(&self) -> u64 {
        self.z_counter
    }

    /// Flip a panel's minimized flag. Restoring a panel also brings it
    /// to front, so it never reappears buried under the others.
    pub fn toggle_minimize(&mut self, id: &str) {
        let restored = match self.panels.get_mut(id) {
            Some(panel) => {
                panel.minimized = !panel.minimized;
                debug!("Panel '{}' minimized: {}", id, panel.minimized);
                !panel.minimized
            }
            None => {
                debug!("toggle_minimize: unknown panel '{}'", id);
                return;
            }
        };

        if restored {
            self.bring_to_front(id);
        }
    }

    /// Restore a panel from the minimized state (no-op if already visible)
    pub fn restore(&mut self, id: &str) {
        match self.panels.get(id) {
            Some(panel) if panel.minimized => self.toggle_minimize(id),
            _ => {}
        }
    }

    /// Flip a panel's collapsed flag. Z-order is untouched.
    pub fn toggle_collapse(&mut self, id: &str) {
        match self.panels.get_mut(id) {
            Some(panel) => {
                panel.collapsed = !panel.collapsed;
                debug!("Panel '{}' collapsed: {}", id, panel.collapsed);
            }
            None => debug!("toggle_collapse: unknown panel '{}'", id),
        }
    }

    /// Assign the next z-order value to a panel, making it topmost.
    /// O(1) regardless of panel count; no re-sort of the other panels.
    pub fn bring_to_front(&mut self, id: &str) {
        match self.panels.get_mut(id) {
            Some(panel) => {
                self.z_counter += 1;
                panel.z_index = self.z_counter;
                debug!("Panel '{}' raised to z {}", id, self.z_counter);
            }
            None => debug!("bring_to_front: unknown panel '{}'", id),
        }
    }

    /// The visible panel with the highest z-index, if any
    pub fn topmost(&self) -> Option<&Panel> {
        self.panels
            .values()
            .filter(|p| p.is_visible())
            .max_by_key(|p| p.z_index)
    }

    /// Find the topmost visible panel whose on-screen rectangle contains
    /// the point, using the injected geometry provider for measurement.
    pub fn panel_at(&self, provider: &dyn BoundsProvider, point: Point) -> Option<&Panel> {
        let mut hit: Option<&Panel> = None;

        for panel in self.panels.values() {
            if !panel.is_visible() {
                continue;
            }
            let Some(bounds) = provider.panel_bounds(&panel.id) else {
                continue;
            };
            if !bounds.contains_point(point) {
                continue;
            }
            if hit.map_or(true, |p| panel.z_index > p.z_index) {
                hit = Some(panel);
            }
        }

        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rectangle;

    fn registry() -> PanelRegistry {
        let entries = vec![
            PanelEntry::new("layers", "Layers"),
            PanelEntry::new("legend", "Legend"),
            PanelEntry::new("attributes", "Attributes"),
        ];
        PanelRegistry::from_config(&entries, &GeneralConfig::default())
    }

    struct FixedBounds;

    impl BoundsProvider for FixedBounds {
        fn container_bounds(&self) -> Rectangle {
            Rectangle::new(0, 0, 1920, 1080)
        }

        fn panel_bounds(&self, id: &str) -> Option<Rectangle> {
            match id {
                // Overlapping on purpose
                "layers" => Some(Rectangle::new(0, 0, 300, 400)),
                "legend" => Some(Rectangle::new(200, 0, 300, 400)),
                _ => None,
            }
        }
    }

    #[test]
    fn test_initial_layout() {
        let reg = registry();
        assert_eq!(reg.len(), 3);

        // x = padding + index * (width + padding), y = padding
        let layers = reg.get("layers").unwrap();
        assert_eq!(layers.position, Point::new(16, 16));

        let legend = reg.get("legend").unwrap();
        assert_eq!(legend.position, Point::new(16 + 336, 16));
    }

    #[test]
    fn test_toggle_minimize_roundtrip() {
        let mut reg = registry();

        reg.toggle_minimize("legend");
        assert!(reg.get("legend").unwrap().minimized);

        let z_before = reg.get("legend").unwrap().z_index;
        reg.toggle_minimize("legend");
        let legend = reg.get("legend").unwrap();

        assert!(!legend.minimized);
        // Restore brings to front
        assert!(legend.z_index > z_before);
        assert_eq!(legend.z_index, reg.z_counter());
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut reg = registry();
        let counter = reg.z_counter();

        reg.toggle_minimize("nonexistent");
        reg.toggle_collapse("nonexistent");
        reg.bring_to_front("nonexistent");

        assert_eq!(reg.z_counter(), counter);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_collapse_leaves_z_order() {
        let mut reg = registry();
        let z_before = reg.get("legend").unwrap().z_index;
        let counter = reg.z_counter();

        reg.toggle_collapse("legend");

        let legend = reg.get("legend").unwrap();
        assert!(legend.collapsed);
        assert_eq!(legend.z_index, z_before);
        assert_eq!(reg.z_counter(), counter);
    }

    #[test]
    fn test_bring_to_front_monotonic() {
        let mut reg = registry();

        reg.bring_to_front("layers");
        reg.bring_to_front("legend");
        reg.bring_to_front("attributes");
        reg.bring_to_front("legend");

        // Most recent call has the strictly highest z
        let legend_z = reg.get("legend").unwrap().z_index;
        for panel in reg.iter() {
            if panel.id != "legend" {
                assert!(panel.z_index < legend_z);
            }
        }
        assert_eq!(reg.topmost().unwrap().id, "legend");
    }

    #[test]
    fn test_restore_only_when_minimized() {
        let mut reg = registry();
        let counter = reg.z_counter();

        // Already visible: no z churn
        reg.restore("layers");
        assert_eq!(reg.z_counter(), counter);

        reg.toggle_minimize("layers");
        reg.restore("layers");
        assert!(!reg.get("layers").unwrap().minimized);
        assert!(reg.z_counter() > counter);
    }

    #[test]
    fn test_panel_at_respects_z_order() {
        let mut reg = registry();
        let provider = FixedBounds;

        // Overlap region belongs to the higher panel
        reg.bring_to_front("layers");
        reg.bring_to_front("legend");
        assert_eq!(reg.panel_at(&provider, Point::new(250, 100)).unwrap().id, "legend");

        reg.bring_to_front("layers");
        assert_eq!(reg.panel_at(&provider, Point::new(250, 100)).unwrap().id, "layers");

        // Outside every panel
        assert!(reg.panel_at(&provider, Point::new(800, 800)).is_none());
    }

    #[test]
    fn test_panel_at_skips_minimized() {
        let mut reg = registry();
        let provider = FixedBounds;

        reg.bring_to_front("legend");
        reg.toggle_minimize("legend");
        // The overlap point now falls through to the panel below
        assert_eq!(reg.panel_at(&provider, Point::new(250, 100)).unwrap().id, "layers");
    }
}
