use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use reqwest::Url;
use saferoute_map::sdk::{
    client::{notify, MapClient, RenderOutcome},
    config::ViewConfig,
    map::{export::MapExports, view::MapView, RouteColor},
    routing::{BackendClient, FetchError, RouteQuery, RouteSource},
    util::rate_limit::backend_limiter,
};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    num::NonZeroU32,
    sync::{Arc, Mutex},
};

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn serve(app: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    Url::parse(&format!("http://{}", addr)).unwrap()
}

/// Backend that records query strings and answers with a fixed body.
async fn canned_backend(status: StatusCode, body: &'static str) -> (Url, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route(
            "/routes",
            get(
                move |State(seen): State<Seen>, Query(params): Query<HashMap<String, String>>| async move {
                    seen.lock().unwrap().push(params);
                    (status, [("content-type", "application/json")], body).into_response()
                },
            ),
        )
        .with_state(seen.clone());
    (serve(app).await, seen)
}

fn backend(url: &Url) -> BackendClient {
    BackendClient::new(url, backend_limiter(NonZeroU32::new(100).unwrap()), None).unwrap()
}

fn client() -> MapClient<MapView, Vec<String>> {
    let config = ViewConfig::default();
    MapClient::new(MapView::new(config.size, config.padding), Vec::new(), &config)
}

const TWO_ROUTES: &str = r#"{"routes":[
    {"route_id":1,"distance_km":5.2,"duration_min":14,"safety_score":0.81,
     "coords":[[19.05,72.83],[19.07,72.85]]},
    {"route_id":2,"distance_km":6.9,"duration_min":18.5,"safety_score":0.64,
     "coords":[[19.05,72.83],[19.06,72.86],[19.07,72.85]]}
]}"#;

#[tokio::test]
async fn renders_backend_routes_with_encoded_query() {
    let (url, seen) = canned_backend(StatusCode::OK, TWO_ROUTES).await;
    let backend = backend(&url);
    let mut client = client().with_hour(Some(21));

    let outcome = client
        .fetch_routes(&backend, " Bandra West ", "Andheri & Juhu")
        .await;

    assert_eq!(outcome, Some(RenderOutcome::Rendered { routes: 2 }));
    let params = seen.lock().unwrap()[0].clone();
    assert_eq!(params["source"], "Bandra West");
    assert_eq!(params["destination"], "Andheri & Juhu");
    assert_eq!(params["hour"], "21");

    let headlines: Vec<_> = client.panel().blocks().iter().map(|b| b.headline()).collect();
    assert_eq!(
        headlines,
        vec![
            "Route 1 / 5.2 km / 14 min / 0.81",
            "Route 2 / 6.9 km / 18.5 min / 0.64"
        ]
    );
    let colors: Vec<_> = client
        .surface()
        .polylines()
        .map(|(_, l)| l.style().color)
        .collect();
    assert_eq!(colors, vec![RouteColor::Green, RouteColor::Orange]);
    assert_eq!(client.surface().viewport().zoom, 15);
    assert!(client.notifier().is_empty());
}

#[tokio::test]
async fn blank_input_never_reaches_backend() {
    let (url, seen) = canned_backend(StatusCode::OK, TWO_ROUTES).await;
    let mut client = client();

    assert_eq!(client.fetch_routes(&backend(&url), "   ", "Andheri").await, None);

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(client.notifier(), &vec![notify::MISSING_INPUT.to_string()]);
}

#[tokio::test]
async fn backend_error_body_is_reported_as_no_routes() {
    let (good, _) = canned_backend(StatusCode::OK, TWO_ROUTES).await;
    let (empty, _) = canned_backend(
        StatusCode::OK,
        r#"{"error":"Could not find source location: Atlantis"}"#,
    )
    .await;
    let mut client = client();
    client.fetch_routes(&backend(&good), "Bandra", "Andheri").await;

    let outcome = client.fetch_routes(&backend(&empty), "Atlantis", "Andheri").await;

    assert_eq!(outcome, Some(RenderOutcome::NoRoutes));
    assert_eq!(client.surface().polylines().count(), 2);
    assert_eq!(client.panel().len(), 2);
    assert_eq!(client.notifier(), &vec![notify::NO_ROUTES.to_string()]);
}

#[tokio::test]
async fn connection_refused_keeps_previous_map() {
    let (good, _) = canned_backend(StatusCode::OK, TWO_ROUTES).await;
    let closed = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap()
    };
    let mut client = client();
    client.fetch_routes(&backend(&good), "Bandra", "Andheri").await;
    let viewport = client.surface().viewport();

    let outcome = client.fetch_routes(&backend(&closed), "Bandra", "Andheri").await;

    assert_eq!(outcome, Some(RenderOutcome::Failed));
    assert_eq!(client.surface().polylines().count(), 2);
    assert_eq!(client.panel().len(), 2);
    assert_eq!(client.surface().viewport(), viewport);
    assert_eq!(client.notifier(), &vec![notify::FETCH_FAILED.to_string()]);
}

#[tokio::test]
async fn non_json_body_is_a_failure() {
    let (url, _) = canned_backend(StatusCode::OK, "<html>gateway</html>").await;
    let mut client = client();

    let outcome = client.fetch_routes(&backend(&url), "Bandra", "Andheri").await;

    assert_eq!(outcome, Some(RenderOutcome::Failed));
    assert_eq!(client.notifier(), &vec![notify::FETCH_FAILED.to_string()]);
}

#[tokio::test]
async fn json_error_status_reads_as_no_routes() {
    let (good, _) = canned_backend(StatusCode::OK, TWO_ROUTES).await;
    let (rejected, _) = canned_backend(
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"detail":"field required: destination"}"#,
    )
    .await;
    let mut client = client();
    client.fetch_routes(&backend(&good), "Bandra", "Andheri").await;

    let outcome = client.fetch_routes(&backend(&rejected), "Bandra", "Andheri").await;

    assert_eq!(outcome, Some(RenderOutcome::NoRoutes));
    assert_eq!(client.surface().polylines().count(), 2);
    assert_eq!(client.notifier(), &vec![notify::NO_ROUTES.to_string()]);
}

#[tokio::test]
async fn non_json_error_status_carries_body() {
    let (url, _) = canned_backend(StatusCode::BAD_GATEWAY, "upstream timed out").await;
    let query = RouteQuery::from_input("Bandra", "Andheri").unwrap();

    let err = backend(&url).fetch_routes(&query).await.unwrap_err();

    match err {
        FetchError::StatusError { status, detail } => {
            assert_eq!(status, 502);
            assert_eq!(detail, "upstream timed out");
        }
        other => panic!("unexpected error: {other}"),
    }

    let mut client = client();
    let outcome = client.fetch_routes(&backend(&url), "Bandra", "Andheri").await;
    assert_eq!(outcome, Some(RenderOutcome::Failed));
    assert_eq!(client.notifier(), &vec![notify::FETCH_FAILED.to_string()]);
}

#[tokio::test]
async fn exported_geojson_matches_rendered_routes() {
    let (url, _) = canned_backend(StatusCode::OK, TWO_ROUTES).await;
    let mut client = client();
    client.fetch_routes(&backend(&url), "Bandra", "Andheri").await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.geojson");
    let exports = MapExports {
        geojson: Some(path.clone()),
        png: None,
    };
    exports.export(client.surface()).unwrap();

    let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let strokes: Vec<_> = doc["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["properties"]["stroke"].clone())
        .collect();
    assert_eq!(strokes, vec![json!("green"), json!("orange")]);
    assert_eq!(doc["viewport"]["zoom"], 15);
}
