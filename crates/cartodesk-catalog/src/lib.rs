pub mod catalog;

pub use catalog::{CatalogState, LayerCatalog};
