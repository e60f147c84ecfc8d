pub mod sdk;

pub use sdk::client::{MapClient, RenderOutcome};
pub use sdk::config::ClientConfig;
pub use sdk::map::{MapSurface, MapView};
pub use sdk::routing::{BackendClient, Route, RouteQuery, RouteSet, RouteSource};
