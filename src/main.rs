use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use axum_prometheus::PrometheusMetricLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scrape_ui::client::HttpScrapeClient;
use scrape_ui::config::{self, Config};
use scrape_ui::handlers;
use scrape_ui::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env first so APP_ENV there also picks the log format.
    dotenvy::dotenv().ok();

    // Initialize tracing — JSON in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scrape_ui=info,tower_http=info"));

    if config::is_production(|key| std::env::var(key).ok()) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("🚀 Scrape UI starting...");

    let config = Config::from_env().expect("Failed to load configuration");
    info!("📝 Configuration loaded");

    let client = HttpScrapeClient::new(&config.scrape_api_base, config.request_timeout)
        .expect("Failed to build scrape client");
    info!(endpoint = %client.endpoint(), "🔗 Scrape endpoint configured");

    // CORS: permissive in dev, restrictive in production.
    let cors = if config.is_dev {
        info!("🔓 CORS: permissive (dev mode)");
        CorsLayer::permissive()
    } else {
        info!("🔒 CORS: restrictive (production mode)");
        CorsLayer::new()
    };

    let addr = config.server_addr();

    let app_state = AppState {
        client: Arc::new(client),
    };

    // Prometheus metrics layer
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = Router::new()
        // Health check + metrics
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        // UI
        .route("/", get(handlers::page::index))
        .route("/scrape", post(handlers::page::submit))
        // Middleware
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    info!("🎧 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
