use docx_rs::{DocumentChild, ParagraphChild, Run, RunChild};
use tracing::debug;

use super::{ExtractionError, TextExtractor};

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    /// Reads body-level paragraphs in document order, each followed by `\n`.
    /// Empty paragraphs still contribute their newline.
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::Docx(e.to_string()))?;

        let mut text = String::new();
        let mut paragraphs = 0usize;
        for child in &docx.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                push_paragraph_text(&paragraph.children, &mut text);
                text.push('\n');
                paragraphs += 1;
            }
        }

        debug!("DOCX parsed: {paragraphs} paragraphs");
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "docx-rs"
    }
}

fn push_paragraph_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, out),
            ParagraphChild::Hyperlink(link) => push_paragraph_text(&link.children, out),
            _ => {}
        }
    }
}

fn push_run_text(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}
