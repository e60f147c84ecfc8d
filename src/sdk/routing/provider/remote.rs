use crate::sdk::routing::error::{BackendErrorPayload, FetchError};
use crate::sdk::routing::route::RouteSet;
use crate::sdk::routing::service::{RouteQuery, RouteSource};
use crate::sdk::util::rate_limit::Limiter;
use reqwest::{Client, Url};
use std::time::Duration;

/// HTTP client for the safety-scoring routes backend (`GET /routes`).
pub struct BackendClient {
    client: Client,
    routes_url: Url,
    limiter: Limiter,
}

impl BackendClient {
    /// `base_url` is the backend root, e.g. `http://127.0.0.1:8000`. Without a
    /// `timeout` the transport default applies.
    pub fn new(base_url: &Url, limiter: Limiter, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            routes_url: routes_endpoint(base_url),
            limiter,
        })
    }

    pub fn routes_url(&self) -> &Url {
        &self.routes_url
    }
}

/// Appends `routes` to the base path, keeping any prefix the base carries.
fn routes_endpoint(base_url: &Url) -> Url {
    let mut url = base_url.clone();
    let path = format!("{}/routes", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url.set_query(None);
    url
}

impl RouteSource for BackendClient {
    async fn fetch_routes(&self, query: &RouteQuery) -> Result<RouteSet, FetchError> {
        self.limiter.until_ready().await;
        log::debug!(
            "[BACKEND] Requesting routes \"{}\" -> \"{}\" (hour: {:?})",
            query.source,
            query.destination,
            query.hour
        );

        let mut request = self.client.get(self.routes_url.clone()).query(&[
            ("source", query.source.as_str()),
            ("destination", query.destination.as_str()),
        ]);
        if let Some(hour) = query.hour {
            request = request.query(&[("hour", hour)]);
        }

        let response = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                log::error!(
                    "Failed to send GET request. URL: {}\nError: {}",
                    self.routes_url,
                    e
                );
                return Err(FetchError::RequestError(e));
            }
        };

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // A JSON error body is still an answer: without `routes` it reads as "nothing found".
            if let Ok(set) = serde_json::from_str::<RouteSet>(&text) {
                let detail = serde_json::from_str::<BackendErrorPayload>(&text)
                    .map(|payload| payload.describe())
                    .unwrap_or_else(|_| "none".to_string());
                log::warn!("Backend returned {} with a JSON body. Detail: {}", status, detail);
                return Ok(set);
            }
            log::error!("Backend returned non-success status: {}. Unparseable Body: {}", status, text);
            return Err(FetchError::StatusError {
                status: status.as_u16(),
                detail: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse RouteSet. URL: {}\nError: {}. Body: {}",
                self.routes_url,
                e,
                text
            );
            FetchError::ParseError(e)
        })
    }
}
