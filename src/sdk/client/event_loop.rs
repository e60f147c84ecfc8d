//! Interactive front end: one lookup per input line, answered as responses arrive.
//!
//! Runs on whatever runtime polls it; the binary uses a current-thread runtime,
//! so all map and panel updates happen on one thread between awaits.

use super::notify::Notifier;
use super::session::{MapClient, RenderOutcome};
use crate::sdk::map::surface::MapSurface;
use crate::sdk::routing::service::RouteSource;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;

/// Separator between source and destination on an input line.
pub const QUERY_SEPARATOR: &str = "->";

/// Splits `Bandra -> Andheri` into its two sides. A line without the
/// separator yields an empty destination, which validation then rejects.
pub fn split_query(line: &str) -> (&str, &str) {
    line.split_once(QUERY_SEPARATOR).unwrap_or((line, ""))
}

/// Reads queries from `input` until a blank line, end of input or a read
/// error, then waits for requests still in flight.
///
/// Requests are never queued behind each other: a new line starts a new
/// request immediately and any older response that arrives afterwards is
/// discarded by the client. `on_outcome` runs after every applied response.
pub async fn run_interactive<S, M, N, R, F>(
    client: &mut MapClient<M, N>,
    backend: Arc<S>,
    input: R,
    mut on_outcome: F,
) where
    S: RouteSource + 'static,
    M: MapSurface,
    N: Notifier,
    R: AsyncBufRead + Unpin,
    F: FnMut(&MapClient<M, N>, RenderOutcome),
{
    let mut lines = input.lines();
    let mut reading = true;
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            line = lines.next_line(), if reading => match line {
                Ok(Some(line)) if !line.trim().is_empty() => {
                    let (source, destination) = split_query(&line);
                    if let Some((ticket, query)) = client.prepare(source, destination) {
                        let backend = Arc::clone(&backend);
                        in_flight.spawn(async move {
                            let result = backend.fetch_routes(&query).await;
                            (ticket, result)
                        });
                    }
                }
                Ok(_) => {
                    log::debug!("Input closed, {} request(s) still pending", in_flight.len());
                    reading = false;
                }
                Err(e) => {
                    log::error!(
                        "Failed to read input: {}. Waiting for {} pending request(s)",
                        e,
                        in_flight.len()
                    );
                    reading = false;
                }
            },
            Some(joined) = in_flight.join_next() => match joined {
                Ok((ticket, result)) => {
                    let outcome = client.complete(ticket, result);
                    on_outcome(&*client, outcome);
                }
                Err(e) => log::error!("Route request task failed: {}", e),
            },
            else => break,
        }
    }
}
