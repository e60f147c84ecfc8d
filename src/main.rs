use anyhow::Context;
use clap::Parser;
use saferoute_map::sdk::{
    client::{event_loop::QUERY_SEPARATOR, run_interactive, ConsoleNotifier, MapClient, Notifier, RenderOutcome},
    config::{parse_backend_url, ClientConfig},
    map::{export::MapExports, view::MapView},
    routing::BackendClient,
    util::{log::init_logging, rate_limit::backend_limiter},
};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::io::BufReader;

/// Finds candidate routes between two places and draws them on a map, safest first
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Starting place (e.g., "Bandra"). Together with --destination runs a single lookup
    #[arg(short, long, requires = "destination")]
    source: Option<String>,

    /// Destination place (e.g., "Andheri")
    #[arg(short, long, requires = "source")]
    destination: Option<String>,

    /// Root URL of the routes backend [default: $SAFEROUTE_BACKEND_URL or http://127.0.0.1:8000]
    #[arg(long)]
    backend: Option<String>,

    /// [Optional] Hour of day (0-23) to score safety for; the backend's clock otherwise
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..24))]
    hour: Option<u8>,

    /// [Optional] Write the drawn routes as GeoJSON after each render
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// [Optional] Render the map to PNG after each render (downloads OSM tiles)
    #[arg(long)]
    png: Option<PathBuf>,

    /// [Optional] Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    // --- 1. Configuration: environment first, flags on top ---
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.backend {
        config.backend_url = parse_backend_url(url)?;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Some(Duration::from_secs(secs));
    }

    // --- 2. Dependency Initialization ---
    let backend = BackendClient::new(
        &config.backend_url,
        backend_limiter(config.requests_per_minute),
        config.timeout,
    )
    .context("Failed to build HTTP client")?;
    log::info!("Using routes backend at {}", backend.routes_url());

    let view = MapView::new(config.view.size, config.view.padding);
    let mut client = MapClient::new(view, ConsoleNotifier::stderr(), &config.view).with_hour(cli.hour);
    let exports = MapExports {
        geojson: cli.geojson,
        png: cli.png,
    };
    if exports.is_empty() {
        log::warn!("No --geojson or --png given; only the results panel will be shown");
    }

    // --- 3. Lookups ---
    match (cli.source, cli.destination) {
        (Some(source), Some(destination)) => {
            if let Some(outcome) = client.fetch_routes(&backend, &source, &destination).await {
                show(&client, outcome, &exports);
            }
        }
        _ => {
            println!(
                "Enter \"<source> {} <destination>\" per line, blank line to quit.",
                QUERY_SEPARATOR
            );
            let stdin = BufReader::new(tokio::io::stdin());
            run_interactive(&mut client, Arc::new(backend), stdin, |c, outcome| {
                show(c, outcome, &exports)
            })
            .await;
        }
    }

    Ok(())
}

/// Prints the results panel and refreshes the exported map after a render.
fn show<N: Notifier>(client: &MapClient<MapView, N>, outcome: RenderOutcome, exports: &MapExports) {
    let RenderOutcome::Rendered { routes } = outcome else {
        return;
    };
    if routes == 0 {
        println!("(no routes to draw)");
    } else {
        print!("{}", client.panel());
    }
    if let Err(e) = exports.export(client.surface()) {
        log::error!("Failed to export map: {}", e);
    }
}
