use super::geo::{fit_bounds, LatLng, LatLngBounds, Viewport};
use super::surface::{LayerId, MapSurface, Polyline, TileLayer};
use std::collections::BTreeMap;

/// Zoom ceiling used while no tile layer is attached.
const FALLBACK_MAX_ZOOM: u8 = 19;

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Tiles(TileLayer),
    Line(Polyline),
}

/// In-memory map: a viewport plus an ordered stack of layers.
///
/// The pixel `size` and `padding` only matter for [`MapSurface::fit_bounds`]
/// and for exporters that rasterize the view.
#[derive(Debug, Clone)]
pub struct MapView {
    size: (u32, u32),
    padding: (u32, u32),
    viewport: Viewport,
    layers: BTreeMap<LayerId, Layer>,
    next_id: u64,
}

impl MapView {
    pub fn new(size: (u32, u32), padding: (u32, u32)) -> Self {
        Self {
            size,
            padding,
            viewport: Viewport {
                center: LatLng::new(0.0, 0.0),
                zoom: 0,
            },
            layers: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn padding(&self) -> (u32, u32) {
        self.padding
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    pub fn tile_layers(&self) -> impl Iterator<Item = &TileLayer> {
        self.layers.values().filter_map(|l| match l {
            Layer::Tiles(t) => Some(t),
            Layer::Line(_) => None,
        })
    }

    /// Lines in the order they were added.
    pub fn polylines(&self) -> impl Iterator<Item = (LayerId, &Polyline)> {
        self.layers.iter().filter_map(|(id, l)| match l {
            Layer::Line(p) => Some((*id, p)),
            Layer::Tiles(_) => None,
        })
    }

    /// Highest zoom any attached tile layer can serve.
    pub fn max_zoom(&self) -> u8 {
        self.tile_layers()
            .map(|t| t.max_zoom)
            .max()
            .unwrap_or(FALLBACK_MAX_ZOOM)
    }

    fn insert(&mut self, layer: Layer) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.insert(id, layer);
        id
    }
}

impl MapSurface for MapView {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.viewport = Viewport {
            center,
            zoom: zoom.min(self.max_zoom()),
        };
    }

    fn add_tile_layer(&mut self, layer: TileLayer) -> LayerId {
        self.insert(Layer::Tiles(layer))
    }

    fn add_polyline(&mut self, line: Polyline) -> LayerId {
        self.insert(Layer::Line(line))
    }

    fn remove_layer(&mut self, id: LayerId) -> bool {
        self.layers.remove(&id).is_some()
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) {
        self.viewport = fit_bounds(&bounds, self.size, self.padding, self.max_zoom());
        log::debug!(
            "Viewport fitted to ({:.5}, {:.5}) at zoom {}",
            self.viewport.center.lat,
            self.viewport.center.lng,
            self.viewport.zoom
        );
    }
}
