//! Classification pipeline: document bytes in, category out.
//!
//! Flow: format check → extract → normalize → vectorize → predict → decode.
//!
//! Every step is deterministic and runs once: no retries, no partial
//! results. A failure at any step is terminal for the request.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, Span};

use crate::classification::artifacts::ModelArtifacts;
use crate::classification::label_decoder::DecodeError;
use crate::classification::normalizer::{normalize, NormalizedText};
use crate::errors::AppError;
use crate::extraction::{extract_text, ExtractionError};
use crate::models::{Category, Classification, Document, UnsupportedFormatError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormatError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Label space and vocabulary size of the loaded model, for health and
/// category listings.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub vocabulary_size: usize,
    pub categories: Vec<Category>,
}

// ────────────────────────────────────────────────────────────────────────────
// Async seam
// ────────────────────────────────────────────────────────────────────────────

/// Classifies an uploaded résumé.
///
/// Carried in `AppState` as `Arc<dyn ResumeClassifier>`.
#[async_trait]
pub trait ResumeClassifier: Send + Sync {
    async fn classify(&self, file_name: String, bytes: Bytes) -> Result<Classification, AppError>;

    fn summary(&self) -> ModelSummary;
}

// ────────────────────────────────────────────────────────────────────────────
// Synchronous pipeline
// ────────────────────────────────────────────────────────────────────────────

/// The pipeline over a shared, read-only set of model artifacts.
/// Cloning is cheap; clones share the same artifacts.
#[derive(Clone)]
pub struct ClassificationPipeline {
    artifacts: Arc<ModelArtifacts>,
}

impl ClassificationPipeline {
    pub fn new(artifacts: Arc<ModelArtifacts>) -> Self {
        Self { artifacts }
    }

    /// Full orchestration from an upload's file name and bytes.
    /// Unsupported extensions are rejected before any extractor runs.
    pub fn classify_upload(
        &self,
        file_name: &str,
        bytes: Bytes,
    ) -> Result<Classification, PipelineError> {
        let document = Document::from_upload(file_name, bytes)?;
        self.classify_document(&document)
    }

    pub fn classify_document(&self, document: &Document) -> Result<Classification, PipelineError> {
        let extracted = extract_text(&document.bytes, document.format)?;
        let normalized = normalize(&extracted);
        debug!(
            "Normalized text from {} to {} bytes",
            extracted.len(),
            normalized.len()
        );

        let category = self.predict_category(&normalized)?;
        info!("Classified {} as '{}'", document.file_name, category);

        Ok(Classification {
            category,
            format: document.format,
            normalized_chars: normalized.len(),
            extracted_text: extracted,
        })
    }

    /// vectorize → predict → decode.
    pub fn predict_category(&self, text: &NormalizedText) -> Result<Category, DecodeError> {
        let features = self.artifacts.vectorizer.transform(text);
        let label = self.artifacts.classifier.predict(&features);
        debug!(
            "Predicted label index {} from {} active terms",
            label,
            features.active_terms()
        );
        self.artifacts.decoder.decode(label)
    }
}

#[async_trait]
impl ResumeClassifier for ClassificationPipeline {
    async fn classify(&self, file_name: String, bytes: Bytes) -> Result<Classification, AppError> {
        // CPU-bound extraction runs off the async executor.
        let pipeline = self.clone();
        let span = Span::current();
        tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            pipeline.classify_upload(&file_name, bytes)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in classification: {e}")))?
        .map_err(AppError::from)
    }

    fn summary(&self) -> ModelSummary {
        ModelSummary {
            vocabulary_size: self.artifacts.vectorizer.vocabulary_size(),
            categories: self.artifacts.decoder.categories().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentFormat;
    use crate::test_support::{
        docx_fixture, fixture_artifacts, mismatched_artifacts, pdf_fixture,
    };

    fn pipeline() -> ClassificationPipeline {
        ClassificationPipeline::new(Arc::new(fixture_artifacts()))
    }

    #[test]
    fn test_golden_category() {
        let category = pipeline()
            .predict_category(&normalize("Senior Rust engineer"))
            .unwrap();
        assert_eq!(category.as_str(), "Rust Developer");
    }

    #[test]
    fn test_golden_categories_per_label() {
        let p = pipeline();
        let cases = [
            ("Python data analyst, 5 years", "Data Science"),
            ("Rust engineer | https://github.com/me", "Rust Developer"),
            ("Regional sales & marketing lead #growth", "Sales"),
        ];
        for (text, expected) in cases {
            assert_eq!(
                p.predict_category(&normalize(text)).unwrap().as_str(),
                expected,
                "text: {text}"
            );
        }
    }

    #[test]
    fn test_out_of_vocabulary_text_still_gets_a_label() {
        let category = pipeline()
            .predict_category(&normalize("milk, eggs, bread, apples"))
            .unwrap();
        assert_eq!(category.as_str(), "Data Science");
    }

    #[test]
    fn test_plain_text_upload() {
        let result = pipeline()
            .classify_upload("resume.txt", Bytes::from_static(b"Senior Rust Engineer\n"))
            .unwrap();
        assert_eq!(result.category.as_str(), "Rust Developer");
        assert_eq!(result.format, DocumentFormat::PlainText);
        assert_eq!(result.extracted_text, "Senior Rust Engineer\n");
        assert_eq!(result.normalized_chars, "Senior Rust Engineer".len());
    }

    #[test]
    fn test_latin1_upload_is_not_an_error() {
        let mut bytes = b"Sales ".to_vec();
        bytes.push(0xE9); // Latin-1 é
        bytes.extend_from_slice(b" marketing");
        let result = pipeline()
            .classify_upload("resume.TXT", Bytes::from(bytes))
            .unwrap();
        assert_eq!(result.category.as_str(), "Sales");
    }

    #[test]
    fn test_docx_upload() {
        let bytes = docx_fixture(&["Jane Doe", "Python and data pipelines"]);
        let result = pipeline()
            .classify_upload("resume.docx", Bytes::from(bytes))
            .unwrap();
        assert_eq!(result.category.as_str(), "Data Science");
    }

    #[test]
    fn test_pdf_upload() {
        let bytes = pdf_fixture(&["Sales and marketing manager"]);
        let result = pipeline()
            .classify_upload("resume.pdf", Bytes::from(bytes))
            .unwrap();
        assert_eq!(result.category.as_str(), "Sales");
    }

    #[test]
    fn test_unsupported_extension_rejected_before_extraction() {
        // Valid PDF bytes: an extractor would succeed if it were invoked.
        let bytes = pdf_fixture(&["Senior Rust Engineer"]);
        let err = pipeline()
            .classify_upload("resume.rtf", Bytes::from(bytes))
            .unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_mislabelled_document_fails_extraction() {
        let err = pipeline()
            .classify_upload("resume.pdf", Bytes::from_static(b"plain text, not a pdf"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Extraction(ExtractionError::Pdf(_))));

        let err = pipeline()
            .classify_upload("resume.docx", Bytes::from_static(b"plain text, not a docx"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Extraction(ExtractionError::Docx(_))));
    }

    #[test]
    fn test_label_outside_decoder_space_is_decode_error() {
        let p = ClassificationPipeline::new(Arc::new(mismatched_artifacts()));
        let err = p
            .classify_upload("resume.txt", Bytes::from_static(b"sales marketing"))
            .unwrap_err();
        match err {
            PipelineError::Decode(e) => assert_eq!(e, DecodeError { index: 2, known: 2 }),
            other => panic!("expected DecodeError, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_calls_are_deterministic() {
        let p = pipeline();
        let bytes = Bytes::from_static(b"Data engineer with Rust and Python experience");
        let first = p.classify_upload("cv.txt", bytes.clone()).unwrap();
        for _ in 0..5 {
            let again = p.classify_upload("cv.txt", bytes.clone()).unwrap();
            assert_eq!(again.category, first.category);
        }
    }

    #[tokio::test]
    async fn test_async_seam_maps_errors() {
        let classifier: Arc<dyn ResumeClassifier> = Arc::new(pipeline());
        let err = classifier
            .classify("resume.rtf".to_string(), Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));

        let ok = classifier
            .classify("resume.txt".to_string(), Bytes::from_static(b"rust engineer"))
            .await
            .unwrap();
        assert_eq!(ok.category.as_str(), "Rust Developer");
    }

    #[test]
    fn test_summary_lists_label_space_in_order() {
        let summary = pipeline().summary();
        assert_eq!(summary.vocabulary_size, 6);
        let names: Vec<&str> = summary.categories.iter().map(Category::as_str).collect();
        assert_eq!(names, ["Data Science", "Rust Developer", "Sales"]);
    }
}
