//! Application state for the web server.

use std::sync::Arc;

use guidefeed::FeedbackService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Report service shared by every request.
    pub service: Arc<FeedbackService>,
}

impl AppState {
    pub fn new(service: FeedbackService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
