//! The drawing capability the route client renders through.
//!
//! Anything that can hold a base tile layer and a set of styled lines can act
//! as the map: the in-memory [`MapView`](super::view::MapView) used by the CLI,
//! or a recorder in tests.

use super::geo::{LatLng, LatLngBounds};
use super::style::LineStyle;
use thiserror::Error;

/// Handle to a layer attached to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

#[derive(Error, Debug, PartialEq)]
pub enum RenderError {
    #[error("Route {route} has no coordinates to fit the view to")]
    EmptyGeometry { route: String },

    #[error("Route {route} has a malformed coordinate at index {index}")]
    MalformedCoordinate { route: String, index: usize },

    #[error("Route {route} has an out-of-range coordinate at index {index}: ({lat}, {lng})")]
    InvalidCoordinate {
        route: String,
        index: usize,
        lat: f64,
        lng: f64,
    },
}

/// Raster base layer. `url_template` uses the `{s}`/`{z}`/`{x}`/`{y}` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub max_zoom: u8,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            max_zoom: 19,
            attribution: "© OpenStreetMap contributors".to_string(),
        }
    }
}

/// A validated line geometry with its style. May be empty, in which case it
/// draws nothing and has no bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<LatLng>,
    style: LineStyle,
    bounds: Option<LatLngBounds>,
}

impl Polyline {
    /// Builds a line for the route labelled `route`. Fails on any coordinate
    /// outside the WGS84 ranges.
    pub fn new(route: &str, points: Vec<LatLng>, style: LineStyle) -> Result<Self, RenderError> {
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_valid()) {
            return Err(RenderError::InvalidCoordinate {
                route: route.to_string(),
                index,
                lat: p.lat,
                lng: p.lng,
            });
        }
        let bounds = LatLngBounds::from_points(&points);
        Ok(Self {
            points,
            style,
            bounds,
        })
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// `None` for an empty line.
    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.bounds
    }
}

pub trait MapSurface {
    /// Moves the view to `center` at `zoom`.
    fn set_view(&mut self, center: LatLng, zoom: u8);

    /// Attaches a base tile layer.
    fn add_tile_layer(&mut self, layer: TileLayer) -> LayerId;

    /// Draws a line and returns the handle needed to remove it later.
    fn add_polyline(&mut self, line: Polyline) -> LayerId;

    /// Detaches a layer. Returns false when the handle was unknown.
    fn remove_layer(&mut self, id: LayerId) -> bool;

    /// Changes the view so `bounds` is fully visible at the largest possible zoom.
    fn fit_bounds(&mut self, bounds: LatLngBounds);
}
