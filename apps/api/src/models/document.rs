use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The declared file name carried an extension outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported file type '.{extension}'. Please upload a PDF, DOCX, or TXT file.")]
pub struct UnsupportedFormatError {
    pub extension: String,
}

/// The closed set of document formats the pipeline can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// Portable document (`.pdf`).
    Pdf,
    /// Word-processor document (`.docx`).
    Docx,
    /// Plain text (`.txt`), UTF-8 with a Latin-1 fallback.
    PlainText,
}

impl DocumentFormat {
    /// Resolves a format from a bare extension, case-insensitively.
    pub fn from_extension(extension: &str) -> Result<Self, UnsupportedFormatError> {
        match extension.to_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::PlainText),
            other => Err(UnsupportedFormatError {
                extension: other.to_string(),
            }),
        }
    }

    /// Resolves a format from the text after the last `.` of a file name.
    /// A name without a `.` is treated as its own extension.
    pub fn from_file_name(file_name: &str) -> Result<Self, UnsupportedFormatError> {
        let extension = file_name.rsplit('.').next().unwrap_or_default();
        Self::from_extension(extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::PlainText => "txt",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// An uploaded document: raw bytes plus the format derived from its name.
/// Lives for a single classification call and is never persisted.
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: String,
    pub format: DocumentFormat,
    pub bytes: Bytes,
}

impl Document {
    /// Builds a document from an upload, rejecting unsupported extensions
    /// before any byte is inspected.
    pub fn from_upload(
        file_name: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Result<Self, UnsupportedFormatError> {
        let file_name = file_name.into();
        let format = DocumentFormat::from_file_name(&file_name)?;
        Ok(Self {
            file_name,
            format,
            bytes: bytes.into(),
        })
    }
}
