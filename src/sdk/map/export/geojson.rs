use super::ExportError;
use crate::sdk::map::view::MapView;
use serde_json::{json, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Encodes every line on the map as a GeoJSON `LineString` feature.
///
/// Styling uses the simplestyle property names (`stroke`, `stroke-width`,
/// `stroke-opacity`) understood by GitHub and geojson.io. The viewport and
/// tile attributions travel as foreign members of the collection.
pub fn to_geojson(view: &MapView) -> Value {
    let features: Vec<Value> = view
        .polylines()
        .map(|(id, line)| {
            let coordinates: Vec<[f64; 2]> = line.points().iter().map(|p| [p.lng, p.lat]).collect();
            json!({
                "type": "Feature",
                "id": id.0,
                "geometry": {
                    "type": "LineString",
                    "coordinates": coordinates,
                },
                "properties": {
                    "stroke": line.style().color.css_name(),
                    "stroke-width": line.style().weight,
                    "stroke-opacity": line.style().opacity,
                },
            })
        })
        .collect();

    let viewport = view.viewport();
    let attribution: Vec<&str> = view.tile_layers().map(|t| t.attribution.as_str()).collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
        "viewport": {
            "center": [viewport.center.lng, viewport.center.lat],
            "zoom": viewport.zoom,
        },
        "attribution": attribution,
    })
}

pub fn write_geojson(view: &MapView, path: &Path) -> Result<(), ExportError> {
    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &to_geojson(view))?;
    out.flush().map_err(write_err)
}
