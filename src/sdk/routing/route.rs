use crate::sdk::map::geo::LatLng;
use crate::sdk::map::surface::RenderError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend-assigned route identifier. Numbers and strings are both accepted
/// and displayed as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteId::Number(n) => write!(f, "{}", n),
            RouteId::Text(s) => f.write_str(s),
        }
    }
}

/// One candidate route as computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub route_id: RouteId,
    /// `[lat, lng]` pairs. Extra components (elevation) are ignored.
    pub coords: Vec<Vec<f64>>,
    pub distance_km: f64,
    pub duration_min: f64,
    /// 0 to 1, owned by the backend's risk model.
    pub safety_score: f64,
}

impl Route {
    /// Geometry as map coordinates. Every coordinate needs at least a latitude
    /// and a longitude.
    pub fn points(&self) -> Result<Vec<LatLng>, RenderError> {
        self.coords
            .iter()
            .enumerate()
            .map(|(index, c)| match c.as_slice() {
                [lat, lng, ..] => Ok(LatLng::new(*lat, *lng)),
                _ => Err(RenderError::MalformedCoordinate {
                    route: self.route_id.to_string(),
                    index,
                }),
            })
            .collect()
    }
}

/// Response envelope of `GET /routes`.
///
/// A missing (or null) `routes` field means nothing was found; the backend
/// then usually explains why in `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSet {
    #[serde(default)]
    pub routes: Option<Vec<Route>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
