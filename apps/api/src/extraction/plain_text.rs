use tracing::debug;

use super::{ExtractionError, TextExtractor};

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        Ok(decode_plain_text(bytes))
    }

    fn name(&self) -> &'static str {
        "plain-text"
    }
}

/// Decodes UTF-8, falling back to Latin-1 when the bytes are not valid UTF-8.
/// Every byte is a Latin-1 code point, so this cannot fail.
pub fn decode_plain_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            debug!(
                "Input is not valid UTF-8 (at byte {}), decoding as Latin-1",
                e.valid_up_to()
            );
            bytes.iter().map(|&b| char::from(b)).collect()
        }
    }
}
