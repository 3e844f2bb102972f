//! Pure data → markup functions.
//!
//! Nothing here touches the network or any view; callers decide where the
//! returned markup goes.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use url::Url;

use crate::models::ScrapeResult;
use crate::view::PageState;

pub const MAX_IMAGES: usize = 6;
pub const MAX_LINKS: usize = 10;
pub const NO_TITLE: &str = "No title found";
pub const NO_DESCRIPTION: &str = "No description available";

/// Substituted for URLs whose scheme can run script in the page.
const BLOCKED_URL: &str = "about:blank";

/// Markup for the result region.
pub fn render_result(result: &ScrapeResult) -> String {
    let mut html = format!(
        r#"
<div class="mb-4">
    <h4 class="font-semibold text-lg">{}</h4>
    <p class="text-gray-700">{}</p>
</div>"#,
        text(result.title().unwrap_or(NO_TITLE)),
        text(result.description().unwrap_or(NO_DESCRIPTION)),
    );

    let images = result.images();
    if !images.is_empty() {
        let grid: String = images
            .iter()
            .take(MAX_IMAGES)
            .map(|src| {
                format!(
                    r#"
        <img src="{}" alt="Scraped content" class="rounded shadow hover:shadow-lg transition-shadow">"#,
                    attr(safe_src(src))
                )
            })
            .collect();
        html.push_str(&format!(
            r#"
<div class="mt-4">
    <h4 class="font-semibold mb-2">Images found ({}):</h4>
    <div class="grid grid-cols-2 md:grid-cols-3 gap-2">{grid}
    </div>
</div>"#,
            images.len()
        ));
    }

    let links = result.links();
    if !links.is_empty() {
        let items: String = links
            .iter()
            .take(MAX_LINKS)
            .map(|link| {
                format!(
                    r#"
        <li><a href="{}" target="_blank" rel="noopener noreferrer" class="text-blue-600 hover:underline">{}</a></li>"#,
                    attr(safe_href(link)),
                    text(link)
                )
            })
            .collect();
        html.push_str(&format!(
            r#"
<div class="mt-4">
    <h4 class="font-semibold mb-2">Links ({}):</h4>
    <ul class="list-disc pl-5 space-y-1">{items}
    </ul>
</div>"#,
            links.len()
        ));
    }

    html
}

/// Full HTML document for the given page state.
///
/// The server renders after the submit cycle has finished, so `#loading` is
/// only ever visible for a `PageState` caught mid-cycle.
pub fn render_page(state: &PageState) -> String {
    let error_text = state.error.as_deref().unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Web Scraper</title>
    <style>.hidden {{ display: none; }}</style>
</head>
<body class="bg-gray-100">
    <main class="container mx-auto p-4">
        <h1 class="text-2xl font-bold mb-4">Web Scraper</h1>
        <form method="post" action="/scrape" class="flex gap-2">
            <input type="text" id="urlInput" name="url" value="{url}" placeholder="https://example.com" class="flex-1 border rounded p-2">
            <button type="submit" class="bg-blue-600 text-white rounded px-4">Scrape</button>
        </form>
        <div id="loading" class="{loading}mt-4">Scraping...</div>
        <div id="error" class="{error}mt-4 text-red-600">{error_text}</div>
        <div id="results" class="{results}mt-4 bg-white rounded shadow p-4">
            <h3 class="text-xl font-semibold mb-2">Results</h3>
            <div id="resultContent">{content}</div>
        </div>
    </main>
</body>
</html>
"#,
        url = attr(&state.url_input),
        loading = hidden_class(state.loading),
        error = hidden_class(state.error.is_some()),
        error_text = text(error_text),
        results = hidden_class(state.results_visible),
        content = state.result_content,
    )
}

fn hidden_class(visible: bool) -> &'static str {
    if visible {
        ""
    } else {
        "hidden "
    }
}

/// URL for an anchor: script schemes and `data:` are blocked.
fn safe_href(raw: &str) -> &str {
    match scheme(raw) {
        Ok(Some(scheme)) if is_script_scheme(&scheme) || scheme == "data" => BLOCKED_URL,
        Ok(_) => raw,
        Err(()) => BLOCKED_URL,
    }
}

/// URL for an image source: script schemes are blocked, `data:` only
/// passes for image media types.
fn safe_src(raw: &str) -> &str {
    match scheme(raw) {
        Ok(Some(scheme)) if is_script_scheme(&scheme) => BLOCKED_URL,
        Ok(Some(scheme)) if scheme == "data" && !is_data_image(raw) => BLOCKED_URL,
        Ok(_) => raw,
        Err(()) => BLOCKED_URL,
    }
}

/// Lowercased scheme of `raw`, `None` for a relative URL, `Err` when it
/// does not parse at all.
fn scheme(raw: &str) -> Result<Option<String>, ()> {
    match Url::parse(raw.trim()) {
        Ok(url) => Ok(Some(url.scheme().to_string())),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(None),
        Err(_) => Err(()),
    }
}

fn is_script_scheme(scheme: &str) -> bool {
    matches!(scheme, "javascript" | "vbscript")
}

fn is_data_image(raw: &str) -> bool {
    raw.trim()
        .get(..11)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data:image/"))
}
