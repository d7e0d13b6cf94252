use std::panic;

use tracing::debug;

use super::{ExtractionError, TextExtractor};

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    /// Extracts every page in order and joins them with no separator.
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        // pdf-extract panics on some malformed content streams instead of erroring.
        let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
            .map_err(|_| {
                ExtractionError::Pdf("a page content stream could not be decoded".to_string())
            })?
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

        debug!("PDF parsed: {} pages", pages.len());
        Ok(pages.concat())
    }

    fn name(&self) -> &'static str {
        "pdf-extract"
    }
}
