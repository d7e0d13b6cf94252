//! Text extraction: turns a document's raw bytes into plain text.
//!
//! One extractor per `DocumentFormat`. Dispatch is an exhaustive match on the
//! format, so a new format cannot be added without an extractor.
//!
//! Extraction is all-or-nothing: a malformed document yields an
//! `ExtractionError`, never partial text.

pub mod docx;
pub mod pdf;
pub mod plain_text;

use thiserror::Error;
use tracing::info;

use crate::models::DocumentFormat;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use plain_text::PlainTextExtractor;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not read PDF document: {0}")]
    Pdf(String),

    #[error("Could not read DOCX document: {0}")]
    Docx(String),
}

/// A format-specific reader from document bytes to text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;

    /// Backend name, for logging.
    fn name(&self) -> &'static str;
}

impl DocumentFormat {
    /// The extractor responsible for this format.
    pub fn extractor(&self) -> &'static dyn TextExtractor {
        match self {
            DocumentFormat::Pdf => &PdfExtractor,
            DocumentFormat::Docx => &DocxExtractor,
            DocumentFormat::PlainText => &PlainTextExtractor,
        }
    }
}

/// Extracts all text from `bytes`, read as `format`.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractionError> {
    let extractor = format.extractor();
    let text = extractor.extract(bytes)?;
    info!(
        "Extracted {} characters from {} bytes ({})",
        text.chars().count(),
        bytes.len(),
        extractor.name()
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_is_per_format() {
        assert_eq!(DocumentFormat::Pdf.extractor().name(), "pdf-extract");
        assert_eq!(DocumentFormat::Docx.extractor().name(), "docx-rs");
        assert_eq!(DocumentFormat::PlainText.extractor().name(), "plain-text");
    }

    #[test]
    fn test_invalid_pdf_bytes_fail() {
        let err = extract_text(b"this is not a pdf", DocumentFormat::Pdf).unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }

    #[test]
    fn test_invalid_docx_bytes_fail() {
        let err = extract_text(b"this is not a docx", DocumentFormat::Docx).unwrap_err();
        assert!(matches!(err, ExtractionError::Docx(_)));
    }

    #[test]
    fn test_plain_text_never_fails() {
        let samples: [&[u8]; 4] = [
            b"",
            b"plain ascii resume",
            "caf\u{e9} r\u{e9}sum\u{e9}".as_bytes(),
            &[0xff, 0xfe, 0x00, 0x80, 0xc3],
        ];
        for bytes in samples {
            assert!(extract_text(bytes, DocumentFormat::PlainText).is_ok());
        }
    }

    #[test]
    fn test_error_message_names_format() {
        let err = extract_text(b"garbage", DocumentFormat::Docx).unwrap_err();
        assert!(err.to_string().starts_with("Could not read DOCX document"));
    }
}
