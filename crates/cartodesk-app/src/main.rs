use anyhow::Result;
use cartodesk_app::Workspace;
use cartodesk_config::Config;
use cartodesk_map::{MemorySurface, SelectionMode};
use cartodesk_panel::Rectangle;
use tracing::info;

/// Headless smoke run: load the configuration, build a workspace over
/// an in-memory surface, and exercise a short interaction sequence.
/// A real deployment embeds the library crates behind a map front-end.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Cartodesk workspace starting...");

    Config::create_default_if_missing()?;
    let config = Config::load()?;

    let mut surface = MemorySurface::new();
    surface.add_feature("parcels", Rectangle::new(100, 100, 200, 150));
    surface.add_feature("parcels", Rectangle::new(350, 120, 180, 140));
    surface.add_feature("roads", Rectangle::new(0, 300, 900, 40));

    let mut workspace = Workspace::new(config, surface);

    for panel in workspace.panels.iter() {
        info!(
            "Panel '{}' at {:?} (z {})",
            panel.id, panel.position, panel.z_index
        );
    }

    workspace.toggle_selection();
    workspace.set_selection_mode(SelectionMode::Box);
    let event = workspace
        .selection
        .box_select(&mut workspace.surface, Rectangle::new(0, 0, 600, 400));
    workspace.handle_selection_event(event);

    info!(
        "Box selection over the demo extent hit {} features",
        workspace.selection.selected().len()
    );

    workspace.apply_command_json(
        r#"{"action":"add_layer","layer":{"name":"osm-roads","title":"OSM Roads","kind":"osm","query":"way[highway]"}}"#,
    );
    info!("Catalog has {} layers", workspace.catalog.len());

    for toast in workspace.notifier.drain() {
        info!("Toast [{:?}]: {}", toast.level, toast.message);
    }

    workspace.teardown();
    Ok(())
}
