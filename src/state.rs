use std::sync::Arc;

use crate::client::ScrapeClient;

/// Shared application state passed to all handlers.
/// The scrape client is built once at startup; each request gets its own
/// controller and page around it.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn ScrapeClient>,
}
