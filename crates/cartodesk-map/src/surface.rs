use crate::selection::SelectionMode;
use cartodesk_panel::{Point, Rectangle};
use slotmap::{new_key_type, SlotMap};
use tracing::debug;

new_key_type! {
    /// Handle to a feature owned by the map collaborator
    pub struct FeatureId;
}

/// Capability boundary to the map viewport.
///
/// The selection controller treats the map as an opaque provider of
/// hit-tests and interaction-handler slots; tile drawing, projection
/// math, and vector rendering live entirely behind this trait.
pub trait MapSurface {
    /// Install the input handler for a selection mode, replacing any
    /// handler already attached. At most one handler is attached at a
    /// time, so events are never delivered twice.
    fn attach_interaction(&mut self, mode: SelectionMode);

    /// Remove the attached input handler, if any
    fn detach_interaction(&mut self);

    /// Features whose geometry contains the point
    fn features_at(&self, point: Point) -> Vec<FeatureId>;

    /// Features whose bounding box intersects the rectangle
    fn features_in(&self, rect: Rectangle) -> Vec<FeatureId>;

    /// Name of the layer a feature belongs to
    fn feature_layer(&self, id: FeatureId) -> Option<&str>;
}

struct StoredFeature {
    bounds: Rectangle,
    layer: String,
}

/// In-memory map surface with axis-aligned feature bounds.
///
/// Backs tests and headless runs; a production front-end wires a real
/// map library behind [`MapSurface`] instead.
pub struct MemorySurface {
    features: SlotMap<FeatureId, StoredFeature>,
    attached: Option<SelectionMode>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self {
            features: SlotMap::with_key(),
            attached: None,
        }
    }

    /// Add a feature with the given bounding box to a layer
    pub fn add_feature(&mut self, layer: &str, bounds: Rectangle) -> FeatureId {
        self.features.insert(StoredFeature {
            bounds,
            layer: layer.to_string(),
        })
    }

    /// Remove a feature (no-op for stale handles)
    pub fn remove_feature(&mut self, id: FeatureId) {
        self.features.remove(id);
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Currently attached interaction handler, if any
    pub fn attached_interaction(&self) -> Option<SelectionMode> {
        self.attached
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface for MemorySurface {
    fn attach_interaction(&mut self, mode: SelectionMode) {
        debug!("Attaching {:?} interaction handler", mode);
        self.attached = Some(mode);
    }

    fn detach_interaction(&mut self) {
        if self.attached.take().is_some() {
            debug!("Detached interaction handler");
        }
    }

    fn features_at(&self, point: Point) -> Vec<FeatureId> {
        self.features
            .iter()
            .filter(|(_, f)| f.bounds.contains_point(point))
            .map(|(id, _)| id)
            .collect()
    }

    fn features_in(&self, rect: Rectangle) -> Vec<FeatureId> {
        self.features
            .iter()
            .filter(|(_, f)| f.bounds.intersects(&rect))
            .map(|(id, _)| id)
            .collect()
    }

    fn feature_layer(&self, id: FeatureId) -> Option<&str> {
        self.features.get(id).map(|f| f.layer.as_str())
    }
}
