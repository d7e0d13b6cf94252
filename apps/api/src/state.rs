use std::sync::Arc;

use crate::classification::ResumeClassifier;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Classification pipeline over the model artifacts loaded at startup.
    pub classifier: Arc<dyn ResumeClassifier>,
    pub config: Config,
}
