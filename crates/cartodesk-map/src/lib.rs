pub mod layer;
pub mod selection;
pub mod surface;

pub use layer::{LayerDescriptor, LayerSource};
pub use selection::{SelectionController, SelectionEvent, SelectionMode, SelectionState};
pub use surface::{FeatureId, MapSurface, MemorySurface};
