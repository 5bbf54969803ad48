use cartodesk_map::LayerDescriptor;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use tracing::debug;

/// The workspace layer list: every layer the user has added, whether
/// discovered from a service, loaded from a file, or drawn by hand.
pub struct LayerCatalog {
    layers: Vec<LayerDescriptor>,
}

impl LayerCatalog {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Add a layer, replacing any existing layer with the same name
    pub fn add(&mut self, layer: LayerDescriptor) {
        debug!("Adding layer '{}' ({})", layer.name, layer.source.kind_label());

        match self.layers.iter_mut().find(|l| l.name == layer.name) {
            Some(existing) => *existing = layer,
            None => self.layers.push(layer),
        }
    }

    /// Remove a layer by name
    pub fn remove(&mut self, name: &str) -> Option<LayerDescriptor> {
        let index = self.layers.iter().position(|l| l.name == name)?;
        Some(self.layers.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&LayerDescriptor> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut LayerDescriptor> {
        self.layers.iter_mut().find(|l| l.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerDescriptor> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Set a layer's visibility; unknown names are a no-op
    pub fn set_visibility(&mut self, name: &str, visible: bool) {
        if let Some(layer) = self.get_mut(name) {
            layer.visible = visible;
        }
    }

    /// Fuzzy-search layer titles and names, best matches first.
    /// An empty query returns all layers in catalog order.
    pub fn search(&self, query: &str, max_results: usize) -> Vec<&LayerDescriptor> {
        if query.trim().is_empty() {
            return self.layers.iter().take(max_results).collect();
        }

        let mut matcher = Matcher::new(Config::DEFAULT);
        let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
        let mut buf = Vec::new();

        let mut scored: Vec<(&LayerDescriptor, u32)> = self
            .layers
            .iter()
            .filter_map(|layer| {
                let title_score = pattern.score(Utf32Str::new(&layer.title, &mut buf), &mut matcher);
                let name_score = pattern.score(Utf32Str::new(&layer.name, &mut buf), &mut matcher);
                title_score.max(name_score).map(|score| (layer, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(max_results);
        scored.into_iter().map(|(layer, _)| layer).collect()
    }
}

impl Default for LayerCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Search-box state for the layers panel: query text, filtered result
/// names, and the highlighted row.
pub struct CatalogState {
    query: String,
    results: Vec<String>,
    selected_index: usize,
    max_results: usize,
}

impl CatalogState {
    pub fn new(catalog: &LayerCatalog, max_results: usize) -> Self {
        let results = catalog
            .search("", max_results)
            .into_iter()
            .map(|l| l.name.clone())
            .collect();

        Self {
            query: String::new(),
            results,
            selected_index: 0,
            max_results,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// Name of the highlighted layer
    pub fn selected(&self) -> Option<&str> {
        self.results.get(self.selected_index).map(|s| s.as_str())
    }

    /// Replace the query and refresh results
    pub fn set_query(&mut self, catalog: &LayerCatalog, query: String) {
        self.query = query;
        self.refresh(catalog);
    }

    /// Append a character to the query
    pub fn push_char(&mut self, catalog: &LayerCatalog, ch: char) {
        self.query.push(ch);
        self.refresh(catalog);
    }

    /// Remove the last character from the query
    pub fn pop_char(&mut self, catalog: &LayerCatalog) {
        self.query.pop();
        self.refresh(catalog);
    }

    /// Move the highlight down, clamped to the result list
    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.results.len() {
            self.selected_index += 1;
        }
    }

    /// Move the highlight up
    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn refresh(&mut self, catalog: &LayerCatalog) {
        self.results = catalog
            .search(&self.query, self.max_results)
            .into_iter()
            .map(|l| l.name.clone())
            .collect();
        self.selected_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartodesk_map::LayerSource;

    fn catalog() -> LayerCatalog {
        let mut catalog = LayerCatalog::new();
        catalog.add(LayerDescriptor::new(
            "osm-roads",
            "OSM Roads",
            LayerSource::Osm {
                query: "way[highway]".to_string(),
            },
        ));
        catalog.add(LayerDescriptor::new(
            "parcels",
            "Cadastral Parcels",
            LayerSource::Wfs {
                endpoint: "http://localhost:8080/geoserver/wfs".to_string(),
                type_name: "cite:parcels".to_string(),
            },
        ));
        catalog.add(LayerDescriptor::new("sketch", "Sketch", LayerSource::Drawing));
        catalog
    }

    #[test]
    fn test_add_replaces_same_name() {
        let mut cat = catalog();
        assert_eq!(cat.len(), 3);

        let mut replacement = LayerDescriptor::new("sketch", "Sketch v2", LayerSource::Drawing);
        replacement.visible = false;
        cat.add(replacement);

        assert_eq!(cat.len(), 3);
        assert_eq!(cat.get("sketch").unwrap().title, "Sketch v2");
    }

    #[test]
    fn test_remove() {
        let mut cat = catalog();
        assert!(cat.remove("parcels").is_some());
        assert!(cat.remove("parcels").is_none());
        assert_eq!(cat.len(), 2);
    }

    #[test]
    fn test_set_visibility_unknown_noop() {
        let mut cat = catalog();
        cat.set_visibility("nope", false);
        cat.set_visibility("sketch", false);
        assert!(!cat.get("sketch").unwrap().visible);
    }

    #[test]
    fn test_empty_query_returns_all() {
        let cat = catalog();
        assert_eq!(cat.search("", 10).len(), 3);
        assert_eq!(cat.search("", 2).len(), 2);
    }

    #[test]
    fn test_fuzzy_search() {
        let cat = catalog();

        let results = cat.search("parcel", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "parcels");

        // Matches against the name as well as the title
        let results = cat.search("osm", 10);
        assert_eq!(results[0].name, "osm-roads");

        assert!(cat.search("zzzz", 10).is_empty());
    }

    #[test]
    fn test_catalog_state_tracks_query() {
        let cat = catalog();
        let mut state = CatalogState::new(&cat, 10);
        assert_eq!(state.results().len(), 3);

        state.set_query(&cat, "sket".to_string());
        assert_eq!(state.results(), &["sketch".to_string()]);
        assert_eq!(state.selected(), Some("sketch"));

        state.pop_char(&cat);
        state.pop_char(&cat);
        state.pop_char(&cat);
        state.pop_char(&cat);
        assert_eq!(state.query(), "");
        assert_eq!(state.results().len(), 3);
    }

    #[test]
    fn test_selection_clamped() {
        let cat = catalog();
        let mut state = CatalogState::new(&cat, 10);

        state.select_previous();
        assert!(state.selected().is_some());

        for _ in 0..10 {
            state.select_next();
        }
        // Highlight stays on the last row
        assert_eq!(state.selected(), state.results().last().map(|s| s.as_str()));
    }
}
