//! Axum route handlers for the Classification API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Category, DocumentFormat};
use crate::state::AppState;

/// Multipart field carrying the résumé.
const FILE_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ClassifyQuery {
    /// Echo the extracted text back so the caller can display it.
    #[serde(default)]
    pub include_text: bool,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub request_id: Uuid,
    pub file_name: String,
    pub format: DocumentFormat,
    pub category: Category,
    pub extracted_chars: usize,
    pub normalized_chars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    pub classified_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub count: usize,
    pub categories: Vec<Category>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/classify
///
/// Accepts a multipart upload with a single `file` field and returns the
/// predicted job category.
pub async fn handle_classify(
    State(state): State<AppState>,
    Query(params): Query<ClassifyQuery>,
    multipart: Multipart,
) -> Result<Json<ClassifyResponse>, AppError> {
    let (file_name, bytes) = read_upload(multipart).await?;

    let request_id = Uuid::new_v4();
    let span = info_span!("classify", %request_id, file_name = %file_name);
    let classification = state
        .classifier
        .classify(file_name.clone(), bytes)
        .instrument(span)
        .await?;

    Ok(Json(ClassifyResponse {
        request_id,
        file_name,
        format: classification.format,
        category: classification.category,
        extracted_chars: classification.extracted_text.chars().count(),
        normalized_chars: classification.normalized_chars,
        extracted_text: params
            .include_text
            .then_some(classification.extracted_text),
        classified_at: Utc::now(),
    }))
}

/// GET /api/v1/categories
///
/// The label space of the loaded model, in label-index order.
pub async fn handle_list_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let categories = state.classifier.summary().categories;
    Json(CategoriesResponse {
        count: categories.len(),
        categories,
    })
}

/// Pulls the `file` field's name and bytes out of the multipart body.
async fn read_upload(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .ok_or_else(|| AppError::Validation("Uploaded file has no file name".to_string()))?;
        let bytes = field.bytes().await.map_err(multipart_error)?;

        return Ok((file_name, bytes));
    }

    Err(AppError::Validation(format!(
        "Multipart body has no '{FILE_FIELD}' field"
    )))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}
