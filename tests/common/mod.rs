//! Local stand-in for the OpenRouteService directions endpoint

#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use pathx::{RouteClient, RouteConfig, Waypoint};

pub const TEST_KEY: &str = "test-key";

/// What the provider saw on its last request
#[derive(Debug, Clone)]
pub struct Captured {
    pub profile: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
pub struct MockProvider {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<Captured>>>,
}

impl MockProvider {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<Captured> {
        self.last.lock().unwrap().clone()
    }

    /// Client with the test key pointed at this provider
    pub fn client(&self) -> RouteClient {
        RouteClient::new(RouteConfig::with_api_key(TEST_KEY).base_url(&self.base_url)).unwrap()
    }
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: String,
    delay: Duration,
    hits: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<Captured>>>,
}

async fn directions(
    State(reply): State<Reply>,
    Path(profile): Path<String>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    reply.hits.fetch_add(1, Ordering::SeqCst);

    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    *reply.last.lock().unwrap() = Some(Captured {
        profile,
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    (reply.status, reply.body.clone())
}

/// Serve a fixed answer on a random local port
pub async fn spawn_provider(status: u16, body: impl Into<String>) -> MockProvider {
    spawn_provider_with_delay(status, body, Duration::ZERO).await
}

pub async fn spawn_provider_with_delay(
    status: u16,
    body: impl Into<String>,
    delay: Duration,
) -> MockProvider {
    let hits = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(Mutex::new(None));
    let reply = Reply {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.into(),
        delay,
        hits: hits.clone(),
        last: last.clone(),
    };

    let app = Router::new()
        .route("/v2/directions/:profile/geojson", post(directions))
        .with_state(reply);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockProvider {
        base_url: format!("http://{}", addr),
        hits,
        last,
    }
}

/// GeoJSON answer with one route of 1500 m / 300 s
pub fn heidelberg_route() -> Value {
    json!({
        "type": "FeatureCollection",
        "bbox": [8.68, 49.41, 8.69, 49.42],
        "features": [{
            "bbox": [8.68, 49.41, 8.69, 49.42],
            "type": "Feature",
            "properties": {
                "summary": {"distance": 1500, "duration": 300},
                "way_points": [0, 1]
            },
            "geometry": {
                "coordinates": [[8.68, 49.41], [8.69, 49.42]],
                "type": "LineString"
            }
        }],
        "metadata": {"service": "routing"}
    })
}

pub fn two_waypoints() -> Vec<Waypoint> {
    vec![Waypoint::from([8.681495, 49.41461]), Waypoint::from([8.687872, 49.420318])]
}
