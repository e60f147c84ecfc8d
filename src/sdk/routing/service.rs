use super::error::FetchError;
use super::route::RouteSet;
use std::future::Future;

/// Source and destination for one lookup, already trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    pub source: String,
    pub destination: String,
    /// Hour of day (0-23) the backend should score risk for; the backend's
    /// current hour when absent.
    pub hour: Option<u8>,
}

impl RouteQuery {
    /// Trims both inputs. Returns `None` if either ends up empty.
    pub fn from_input(source: &str, destination: &str) -> Option<Self> {
        let source = source.trim();
        let destination = destination.trim();
        if source.is_empty() || destination.is_empty() {
            return None;
        }
        Some(Self {
            source: source.to_string(),
            destination: destination.to_string(),
            hour: None,
        })
    }

    pub fn with_hour(mut self, hour: Option<u8>) -> Self {
        self.hour = hour;
        self
    }
}

pub trait RouteSource: Send + Sync {
    /// Asks for candidate routes. Resolves once the whole body is decoded.
    fn fetch_routes(
        &self,
        query: &RouteQuery,
    ) -> impl Future<Output = Result<RouteSet, FetchError>> + Send;
}
