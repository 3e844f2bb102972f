mod scrape_result;

pub use scrape_result::{ScrapeRequest, ScrapeResult};
