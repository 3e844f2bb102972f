// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use scrape_ui::{client::HttpScrapeClient, handlers, state::AppState};

// ── Mock scrape backend ──────────────────────────────────────────────────────

/// What the mock backend answers with.
#[derive(Clone)]
pub enum Reply {
    Json(StatusCode, Value),
    Raw(StatusCode, &'static str),
    Slow(Duration, Value),
}

/// Stand-in for the external scraping service. Counts calls and keeps the
/// request bodies it received.
pub struct MockBackend {
    reply: Reply,
    calls: AtomicUsize,
    bodies: Mutex<Vec<Value>>,
}

impl MockBackend {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }
}

async fn mock_scrape(
    State(backend): State<Arc<MockBackend>>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    backend.calls.fetch_add(1, Ordering::SeqCst);
    backend.bodies.lock().unwrap().push(body);
    match &backend.reply {
        Reply::Json(status, value) => (*status, value.to_string()),
        Reply::Raw(status, text) => (*status, text.to_string()),
        Reply::Slow(delay, value) => {
            tokio::time::sleep(*delay).await;
            (StatusCode::OK, value.to_string())
        }
    }
}

/// Serve a mock backend on an ephemeral port and return its base URL.
pub async fn spawn_backend(reply: Reply) -> (String, Arc<MockBackend>) {
    let backend = Arc::new(MockBackend {
        reply,
        calls: AtomicUsize::new(0),
        bodies: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/api/scrape", post(mock_scrape))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), backend)
}

/// Base URL of a port nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

// ── UI app ───────────────────────────────────────────────────────────────────

/// Build the UI router wired to a real HTTP client pointed at `base_url`.
pub fn create_test_app(base_url: &str) -> Router {
    let client = HttpScrapeClient::new(base_url, Some(Duration::from_secs(5)))
        .expect("Failed to build scrape client");
    let state = AppState {
        client: Arc::new(client),
    };
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/", get(handlers::page::index))
        .route("/scrape", post(handlers::page::submit))
        .with_state(state)
}

/// A full response body where every field is populated, with more images
/// and links than the page shows.
pub fn full_result() -> Value {
    let images: Vec<String> = (0..8)
        .map(|i| format!("https://example.com/img{i}.png"))
        .collect();
    let links: Vec<String> = (0..12)
        .map(|i| format!("https://example.com/page{i}"))
        .collect();
    serde_json::json!({
        "title": "Example Domain",
        "description": "Illustrative examples in documents",
        "images": images,
        "links": links,
    })
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn post_form(app: Router, uri: &str, url: &str) -> (StatusCode, String) {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("url", url)
        .finish();
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

// ── Markup helpers ───────────────────────────────────────────────────────────

pub fn count(html: &str, selector: &str) -> usize {
    let doc = scraper::Html::parse_document(html);
    let selector = scraper::Selector::parse(selector).unwrap();
    doc.select(&selector).count()
}

pub fn text_of(html: &str, selector: &str) -> Option<String> {
    let doc = scraper::Html::parse_document(html);
    let selector = scraper::Selector::parse(selector).unwrap();
    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}
