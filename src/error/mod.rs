use axum::http::StatusCode;
use thiserror::Error;

/// Shown when the submitted URL is empty after trimming.
pub const VALIDATION_MESSAGE: &str = "Please enter a valid URL";

/// Shown for every kind of request failure; the detail only goes to the logs.
pub const REQUEST_FAILURE_MESSAGE: &str = "Failed to scrape the website. Please try again.";

/// Failure talking to the scrape endpoint.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid scrape endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    Build(reqwest::Error),

    #[error("Scrape endpoint returned status {0}")]
    Status(u16),

    #[error("Request to scrape endpoint failed: {0}")]
    Transport(reqwest::Error),

    #[error("Malformed scrape response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Outcome of a rejected or failed `submit_url` cycle.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Validation error: URL is empty")]
    Validation,

    #[error("Request failure: {0}")]
    RequestFailure(#[from] ClientError),

    #[error("A scrape request is already in flight")]
    Busy,
}

impl SubmitError {
    /// The text the user sees, if any. A busy rejection leaves the page alone.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            SubmitError::Validation => Some(VALIDATION_MESSAGE),
            SubmitError::RequestFailure(_) => Some(REQUEST_FAILURE_MESSAGE),
            SubmitError::Busy => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SubmitError::Validation => StatusCode::BAD_REQUEST,
            SubmitError::RequestFailure(_) => StatusCode::BAD_GATEWAY,
            SubmitError::Busy => StatusCode::CONFLICT,
        }
    }
}

pub type SubmitResult<T> = Result<T, SubmitError>;
