use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, and the shape of the loaded model.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let summary = state.classifier.summary();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-screener-api",
        "model": {
            "vocabulary_size": summary.vocabulary_size,
            "label_count": summary.categories.len()
        }
    }))
}
