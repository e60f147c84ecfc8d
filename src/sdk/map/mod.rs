pub mod export;
pub mod geo;
pub mod style;
pub mod surface;
pub mod view;

pub use geo::{LatLng, LatLngBounds, Viewport};
pub use style::{LineStyle, RouteColor};
pub use surface::{LayerId, MapSurface, Polyline, RenderError, TileLayer};
pub use view::{Layer, MapView};
