//! Snapshots of a [`MapView`] written after each render.

mod geojson;
mod png;

pub use geojson::{to_geojson, write_geojson};
pub use png::write_png;

use super::view::MapView;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render map image: {0}")]
    Render(String),
}

/// Where the current map gets written. Both targets are optional.
#[derive(Debug, Clone, Default)]
pub struct MapExports {
    pub geojson: Option<PathBuf>,
    pub png: Option<PathBuf>,
}

impl MapExports {
    pub fn is_empty(&self) -> bool {
        self.geojson.is_none() && self.png.is_none()
    }

    pub fn export(&self, view: &MapView) -> Result<(), ExportError> {
        if let Some(path) = &self.geojson {
            write_geojson(view, path)?;
            log::info!("Map layers written to {}", path.display());
        }
        if let Some(path) = &self.png {
            write_png(view, path)?;
            log::info!("Map image written to {}", path.display());
        }
        Ok(())
    }
}
