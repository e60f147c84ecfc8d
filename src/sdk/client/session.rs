//! The route client proper: validation, request bookkeeping and the render cycle.

use super::notify::{self, Notifier};
use super::panel::{ResultsPanel, SummaryBlock};
use crate::sdk::config::ViewConfig;
use crate::sdk::map::style::{LineStyle, RouteColor};
use crate::sdk::map::surface::{LayerId, MapSurface, Polyline, RenderError};
use crate::sdk::routing::error::FetchError;
use crate::sdk::routing::route::{Route, RouteSet};
use crate::sdk::routing::service::{RouteQuery, RouteSource};
use thiserror::Error;

/// Anything that aborts a lookup after the request was issued.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Sequence number handed out per request. Only the newest one renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Map and panel now show exactly this many routes.
    Rendered { routes: usize },
    /// Backend answered without routes; nothing changed.
    NoRoutes,
    /// Request or render failed; the user saw the generic alert.
    Failed,
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
}

/// Owns the map surface, the drawn overlays and the results panel.
///
/// Overlays always mirror the last route set rendered: every previous line is
/// removed before the first new one is drawn.
pub struct MapClient<M: MapSurface, N: Notifier> {
    surface: M,
    notifier: N,
    panel: ResultsPanel,
    overlays: Vec<LayerId>,
    line_weight: f64,
    line_opacity: f64,
    hour: Option<u8>,
    issued: u64,
}

impl<M: MapSurface, N: Notifier> MapClient<M, N> {
    /// Centers the surface on the configured default and attaches the base layer.
    pub fn new(mut surface: M, notifier: N, view: &ViewConfig) -> Self {
        surface.set_view(view.center, view.zoom);
        surface.add_tile_layer(view.tile_layer.clone());
        Self {
            surface,
            notifier,
            panel: ResultsPanel::default(),
            overlays: Vec::new(),
            line_weight: view.line_weight,
            line_opacity: view.line_opacity,
            hour: None,
            issued: 0,
        }
    }

    /// Hour of day forwarded with every query.
    pub fn with_hour(mut self, hour: Option<u8>) -> Self {
        self.hour = hour;
        self
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn panel(&self) -> &ResultsPanel {
        &self.panel
    }

    pub fn overlays(&self) -> &[LayerId] {
        &self.overlays
    }

    /// Validates user input and issues a ticket for the request about to be
    /// made. Alerts and returns `None` when either field is blank.
    pub fn prepare(&mut self, source: &str, destination: &str) -> Option<(Ticket, RouteQuery)> {
        let Some(query) = RouteQuery::from_input(source, destination) else {
            self.notifier.alert(notify::MISSING_INPUT);
            return None;
        };
        self.issued += 1;
        Some((Ticket(self.issued), query.with_hour(self.hour)))
    }

    /// Applies the result of the request identified by `ticket`.
    pub fn complete(&mut self, ticket: Ticket, result: Result<RouteSet, FetchError>) -> RenderOutcome {
        if ticket.0 != self.issued {
            log::debug!(
                "Dropping response for request #{} (latest is #{})",
                ticket.0,
                self.issued
            );
            return RenderOutcome::Stale;
        }

        match result.map_err(LookupError::from).and_then(|set| self.apply(set)) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Error fetching routes: {}", e);
                self.notifier.alert(notify::FETCH_FAILED);
                RenderOutcome::Failed
            }
        }
    }

    /// Validates, fetches and renders in one go. `None` when validation failed
    /// and no request was made.
    pub async fn fetch_routes<S: RouteSource>(
        &mut self,
        backend: &S,
        source: &str,
        destination: &str,
    ) -> Option<RenderOutcome> {
        let (ticket, query) = self.prepare(source, destination)?;
        let result = backend.fetch_routes(&query).await;
        Some(self.complete(ticket, result))
    }

    fn apply(&mut self, set: RouteSet) -> Result<RenderOutcome, LookupError> {
        let Some(routes) = set.routes else {
            if let Some(reason) = set.error {
                log::warn!("Backend found no routes: {}", reason);
            }
            self.notifier.alert(notify::NO_ROUTES);
            return Ok(RenderOutcome::NoRoutes);
        };

        self.clear();
        for (idx, route) in routes.iter().enumerate() {
            self.draw(idx, route)?;
        }
        log::info!("Rendered {} route(s)", routes.len());
        Ok(RenderOutcome::Rendered {
            routes: routes.len(),
        })
    }

    fn clear(&mut self) {
        for id in self.overlays.drain(..) {
            self.surface.remove_layer(id);
        }
        self.panel.clear();
    }

    fn draw(&mut self, idx: usize, route: &Route) -> Result<(), RenderError> {
        let color = RouteColor::for_index(idx);
        let style = LineStyle {
            color,
            weight: self.line_weight,
            opacity: self.line_opacity,
        };
        let line = Polyline::new(&route.route_id.to_string(), route.points()?, style)?;
        let bounds = line.bounds();

        self.overlays.push(self.surface.add_polyline(line));
        self.panel.append(SummaryBlock::from_route(route, color));

        if idx == 0 {
            let bounds = bounds.ok_or_else(|| RenderError::EmptyGeometry {
                route: route.route_id.to_string(),
            })?;
            self.surface.fit_bounds(bounds);
        }
        Ok(())
    }
}
