use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Form;
use serde::Deserialize;

use crate::controller::ScrapeUiController;
use crate::render::render_page;
use crate::state::AppState;
use crate::view::PageView;

#[derive(Debug, Deserialize)]
pub struct ScrapeForm {
    #[serde(default)]
    pub url: String,
}

/// GET /
///
/// The idle page: empty input, every region hidden.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let controller = ScrapeUiController::new(state.client, PageView::default());
    controller.initialize();
    Html(render_page(&controller.view().snapshot()))
}

/// POST /scrape
///
/// Runs one submit cycle on a fresh page and renders where it ended up.
/// Failures still return the page (with the error region shown) under a
/// non-2xx status.
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ScrapeForm>,
) -> (StatusCode, Html<String>) {
    let controller = ScrapeUiController::new(state.client, PageView::new(form.url.as_str()));

    let status = match controller.submit_url(&form.url).await {
        Ok(result) => {
            tracing::info!(
                url = form.url.trim(),
                has_title = result.title().is_some(),
                images = result.images().len(),
                links = result.links().len(),
                "Scrape rendered"
            );
            StatusCode::OK
        }
        Err(e) => {
            tracing::debug!(error = %e, "Scrape cycle ended without results");
            e.status_code()
        }
    };

    let page = controller.into_view().snapshot();
    tracing::debug!(state = %page.visual_state(), "Page rendered");
    (status, Html(render_page(&page)))
}
