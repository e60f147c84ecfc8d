use crate::sdk::map::geo::LatLng;
use crate::sdk::map::style::LineStyle;
use crate::sdk::map::surface::TileLayer;
use crate::sdk::util::rate_limit::DEFAULT_REQUESTS_PER_MINUTE;
use reqwest::Url;
use std::env;
use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

pub const BACKEND_URL_VAR: &str = "SAFEROUTE_BACKEND_URL";
pub const REQUESTS_PER_MINUTE_VAR: &str = "SAFEROUTE_REQUESTS_PER_MINUTE";
pub const TIMEOUT_SECS_VAR: &str = "SAFEROUTE_TIMEOUT_SECS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid backend URL \"{url}\": {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    #[error("Invalid value \"{value}\" for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// What the map shows before any route is drawn, and how lines look.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub center: LatLng,
    pub zoom: u8,
    /// Pixel size of the rendered map, used for fitting and image export.
    pub size: (u32, u32),
    pub padding: (u32, u32),
    pub tile_layer: TileLayer,
    pub line_weight: f64,
    pub line_opacity: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: LatLng::new(19.07, 72.87),
            zoom: 13,
            size: (1200, 600),
            padding: (20, 20),
            tile_layer: TileLayer::default(),
            line_weight: LineStyle::DEFAULT_WEIGHT,
            line_opacity: LineStyle::DEFAULT_OPACITY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend_url: Url,
    pub requests_per_minute: NonZeroU32,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
    pub view: ViewConfig,
}

impl ClientConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to honour `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any variable source; unset variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = parse_backend_url(
            lookup(BACKEND_URL_VAR)
                .as_deref()
                .unwrap_or(DEFAULT_BACKEND_URL),
        )?;

        let requests_per_minute = match lookup(REQUESTS_PER_MINUTE_VAR) {
            Some(value) => value
                .trim()
                .parse::<NonZeroU32>()
                .map_err(|e| ConfigError::InvalidValue {
                    name: REQUESTS_PER_MINUTE_VAR,
                    value: value.clone(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_REQUESTS_PER_MINUTE,
        };

        let timeout = match lookup(TIMEOUT_SECS_VAR) {
            Some(value) => Some(parse_timeout_secs(&value)?),
            None => None,
        };

        Ok(Self {
            backend_url,
            requests_per_minute,
            timeout,
            view: ViewConfig::default(),
        })
    }
}

/// Accepts absolute `http`/`https` URLs only.
pub fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBackendUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {}", other))),
    }
}

fn parse_timeout_secs(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        Ok(_) => Err(ConfigError::InvalidValue {
            name: TIMEOUT_SECS_VAR,
            value: value.to_string(),
            reason: "must be positive".to_string(),
        }),
        Err(e) => Err(ConfigError::InvalidValue {
            name: TIMEOUT_SECS_VAR,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.backend_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.requests_per_minute.get(), 30);
        assert!(config.timeout.is_none());
        assert_eq!(config.view.tile_layer.max_zoom, 19);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BACKEND_URL_VAR, "https://routes.example.org/api"),
            (REQUESTS_PER_MINUTE_VAR, "5"),
            (TIMEOUT_SECS_VAR, "20"),
        ]))
        .unwrap();
        assert_eq!(config.backend_url.host_str(), Some("routes.example.org"));
        assert_eq!(config.requests_per_minute.get(), 5);
        assert_eq!(config.timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(BACKEND_URL_VAR, "ftp://example.org")])),
            Err(ConfigError::InvalidBackendUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(REQUESTS_PER_MINUTE_VAR, "0")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(TIMEOUT_SECS_VAR, "soon")])),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
