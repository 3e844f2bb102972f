use serde::{Deserialize, Serialize};

/// Body sent to `POST /api/scrape`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

/// Page data returned by the scrape endpoint.
///
/// Every field is optional — the backend omits whatever it could not
/// extract, and an explicit `null` is treated the same as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub links: Option<Vec<String>>,
}

impl ScrapeResult {
    /// Title, unless absent or empty.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|s| !s.is_empty())
    }

    /// Description, unless absent or empty.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|s| !s.is_empty())
    }

    pub fn images(&self) -> &[String] {
        self.images.as_deref().unwrap_or_default()
    }

    pub fn links(&self) -> &[String] {
        self.links.as_deref().unwrap_or_default()
    }
}
