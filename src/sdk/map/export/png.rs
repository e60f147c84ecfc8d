use super::ExportError;
use crate::sdk::map::surface::TileLayer;
use crate::sdk::map::view::MapView;
use staticmap::tools::{Color, LineBuilder};
use staticmap::StaticMapBuilder;
use std::path::Path;

/// Rasterizes the view over its base tiles. Tiles are downloaded while rendering.
pub fn write_png(view: &MapView, path: &Path) -> Result<(), ExportError> {
    let render_err = |e: staticmap::Error| ExportError::Render(e.to_string());

    // staticmap has no subdomain rotation.
    let template = view
        .tile_layers()
        .next()
        .map(|t| t.url_template.clone())
        .unwrap_or_else(|| TileLayer::default().url_template)
        .replace("{s}", "a");

    let viewport = view.viewport();
    let (width, height) = view.size();
    let mut map = StaticMapBuilder::default()
        .width(width)
        .height(height)
        .padding(view.padding())
        .url_template(template)
        .zoom(viewport.zoom)
        .lat_center(viewport.center.lat)
        .lon_center(viewport.center.lng)
        .build()
        .map_err(render_err)?;

    // A line with no points has no extent to draw or to measure.
    for (_, line) in view.polylines().filter(|(_, l)| !l.points().is_empty()) {
        let style = line.style();
        let (r, g, b) = style.color.rgb();
        let tool = LineBuilder::default()
            .lat_coordinates(line.points().iter().map(|p| p.lat))
            .lon_coordinates(line.points().iter().map(|p| p.lng))
            .width(style.weight as f32)
            .simplify(true)
            .color(Color::new(true, r, g, b, style.alpha()))
            .build()
            .map_err(render_err)?;
        map.add_tool(tool);
    }

    map.save_png(path).map_err(render_err)
}
