pub mod error;
pub mod provider;
pub mod route;
pub mod service;

pub use error::FetchError;
pub use provider::BackendClient;
pub use route::{Route, RouteId, RouteSet};
pub use service::{RouteQuery, RouteSource};
