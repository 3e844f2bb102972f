use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::client::ScrapeClient;
use crate::error::{SubmitError, SubmitResult};
use crate::models::ScrapeResult;
use crate::render;
use crate::view::View;

/// Drives one request/response/render cycle against a `View`.
///
/// A controller admits one cycle at a time: `submit_url` while another
/// cycle is in flight returns `SubmitError::Busy` without touching the view
/// or the network.
pub struct ScrapeUiController<V: View> {
    client: Arc<dyn ScrapeClient>,
    view: V,
    in_flight: AtomicBool,
}

impl<V: View> ScrapeUiController<V> {
    pub fn new(client: Arc<dyn ScrapeClient>, view: V) -> Self {
        Self {
            client,
            view,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Mount hook. Holds no state; only reports readiness.
    pub fn initialize(&self) {
        tracing::info!("Web scraper initialized");
    }

    /// Validate `raw_input`, call the scrape endpoint and render the outcome.
    pub async fn submit_url(&self, raw_input: &str) -> SubmitResult<ScrapeResult> {
        let url = raw_input.trim();
        if url.is_empty() {
            return Err(self.fail(SubmitError::Validation));
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(url, "Ignoring submit while a request is in flight");
            return Err(SubmitError::Busy);
        }

        self.view.set_loading(true);
        self.view.set_results_visible(false);
        self.view.hide_error();
        let _cycle = CycleGuard {
            view: &self.view,
            in_flight: &self.in_flight,
        };

        match self.client.scrape(url).await {
            Ok(result) => {
                self.render(&result);
                self.view.set_results_visible(true);
                Ok(result)
            }
            Err(e) => {
                tracing::error!(error = %e, url, "Scrape request failed");
                Err(self.fail(SubmitError::RequestFailure(e)))
            }
        }
    }

    /// Write the markup for `result` into the result region.
    pub fn render(&self, result: &ScrapeResult) {
        self.view.set_result_content(render::render_result(result));
    }

    pub fn show_error(&self, message: &str) {
        self.view.show_error(message);
    }

    /// Surface `err` to the user, if it carries a message, and hand it back.
    fn fail(&self, err: SubmitError) -> SubmitError {
        if let Some(message) = err.user_message() {
            self.show_error(message);
        }
        err
    }
}

/// Hides the loading indicator and releases the in-flight slot when the
/// cycle ends, including when the submit future is dropped.
struct CycleGuard<'a, V: View> {
    view: &'a V,
    in_flight: &'a AtomicBool,
}

impl<V: View> Drop for CycleGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_loading(false);
        self.in_flight.store(false, Ordering::Release);
    }
}
