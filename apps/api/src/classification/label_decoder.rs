use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classification::artifacts::{ArtifactError, ArtifactKind};
use crate::models::Category;

/// The classifier produced an index the label encoder does not know.
/// Only happens when the classifier and encoder artifacts are out of sync.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Classifier produced label index {index}, but the label encoder only knows {known} categories")]
pub struct DecodeError {
    pub index: usize,
    pub known: usize,
}

/// Maps a label index back to its category name.
pub trait LabelDecoder: Send + Sync {
    fn decode(&self, index: usize) -> Result<Category, DecodeError>;

    /// The full label space, in index order.
    fn categories(&self) -> &[Category];
}

/// Serialized form of the fitted label encoder (`encoder.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoderArtifact {
    pub format_version: u32,
    pub classes: Vec<String>,
}

#[derive(Debug)]
pub struct LabelEncoder {
    classes: Vec<Category>,
}

impl LabelEncoder {
    pub fn from_artifact(artifact: LabelEncoderArtifact) -> Result<Self, ArtifactError> {
        let kind = ArtifactKind::LabelEncoder;
        ArtifactError::check_version(kind, artifact.format_version)?;

        if artifact.classes.is_empty() {
            return Err(ArtifactError::invalid(kind, "label set is empty"));
        }
        if artifact.classes.iter().any(|c| c.trim().is_empty()) {
            return Err(ArtifactError::invalid(kind, "label names must not be blank"));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = artifact.classes.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(ArtifactError::invalid(
                kind,
                format!("label '{duplicate}' appears more than once"),
            ));
        }

        Ok(Self {
            classes: artifact.classes.into_iter().map(Category::new).collect(),
        })
    }
}

impl LabelDecoder for LabelEncoder {
    fn decode(&self, index: usize) -> Result<Category, DecodeError> {
        self.classes.get(index).cloned().ok_or(DecodeError {
            index,
            known: self.classes.len(),
        })
    }

    fn categories(&self) -> &[Category] {
        &self.classes
    }
}
