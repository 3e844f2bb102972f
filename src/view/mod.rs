use std::sync::{Mutex, MutexGuard, PoisonError};

use strum::{AsRefStr, Display};

/// The document the controller writes to.
///
/// Methods take `&self` so one view can be shared between the controller
/// and whoever renders it afterwards.
pub trait View: Send + Sync {
    fn set_loading(&self, visible: bool);
    fn set_results_visible(&self, visible: bool);
    fn show_error(&self, message: &str);
    fn hide_error(&self);
    fn set_result_content(&self, html: String);
}

/// Mutually exclusive visual states of the page. The error region is an
/// overlay tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum VisualState {
    Idle,
    Loading,
    Result,
}

/// In-memory model of the page regions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    /// Value echoed back into the URL input.
    pub url_input: String,
    pub loading: bool,
    pub results_visible: bool,
    pub error: Option<String>,
    /// Markup of the result region.
    pub result_content: String,
}

impl PageState {
    pub fn visual_state(&self) -> VisualState {
        if self.loading {
            VisualState::Loading
        } else if self.results_visible {
            VisualState::Result
        } else {
            VisualState::Idle
        }
    }
}

/// `View` backed by a `PageState`, rendered to HTML once the cycle is over.
#[derive(Debug, Default)]
pub struct PageView {
    state: Mutex<PageState>,
}

impl PageView {
    pub fn new(url_input: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(PageState {
                url_input: url_input.into(),
                ..Default::default()
            }),
        }
    }

    pub fn snapshot(&self) -> PageState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        // Every update is a single field write, so a poisoned lock is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl View for PageView {
    fn set_loading(&self, visible: bool) {
        self.lock().loading = visible;
    }

    fn set_results_visible(&self, visible: bool) {
        self.lock().results_visible = visible;
    }

    fn show_error(&self, message: &str) {
        self.lock().error = Some(message.to_string());
    }

    fn hide_error(&self) {
        self.lock().error = None;
    }

    fn set_result_content(&self, html: String) {
        self.lock().result_content = html;
    }
}
