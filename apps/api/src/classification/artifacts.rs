//! Frozen model artifacts: loaded once at startup, read-only afterwards.
//!
//! Loading is all-or-nothing: if any of the three artifacts fails to read,
//! parse or validate, no `ModelArtifacts` is produced and the service does
//! not start.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

use crate::classification::classifier::{Classifier, LinearArtifact, LinearClassifier};
use crate::classification::label_decoder::{LabelDecoder, LabelEncoder, LabelEncoderArtifact};
use crate::classification::vectorizer::{TfidfArtifact, TfidfVectorizer, Vectorizer};

/// The only artifact `format_version` this build understands.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Vectorizer,
    Classifier,
    LabelEncoder,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArtifactKind::Vectorizer => "term-weighting transform",
            ArtifactKind::Classifier => "classifier",
            ArtifactKind::LabelEncoder => "label encoder",
        })
    }
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read {kind} artifact at {}: {source}", .path.display())]
    Io {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {kind} artifact at {}: {source}", .path.display())]
    Parse {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} artifact has format_version {found}, expected {}", ARTIFACT_FORMAT_VERSION)]
    UnsupportedVersion { kind: ArtifactKind, found: u32 },

    #[error("{kind} artifact is invalid: {reason}")]
    Invalid { kind: ArtifactKind, reason: String },

    #[error("Classifier expects {classifier} features but the vectorizer produces {vectorizer}")]
    DimensionMismatch { vectorizer: usize, classifier: usize },
}

impl ArtifactError {
    pub fn invalid(kind: ArtifactKind, reason: impl Into<String>) -> Self {
        ArtifactError::Invalid {
            kind,
            reason: reason.into(),
        }
    }

    pub fn check_version(kind: ArtifactKind, found: u32) -> Result<(), Self> {
        if found == ARTIFACT_FORMAT_VERSION {
            Ok(())
        } else {
            Err(ArtifactError::UnsupportedVersion { kind, found })
        }
    }
}

/// Where the three artifacts live on disk.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub vectorizer: PathBuf,
    pub classifier: PathBuf,
    pub label_encoder: PathBuf,
}

impl ArtifactPaths {
    /// Conventional file names inside a model directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            vectorizer: dir.join("tfidf.json"),
            classifier: dir.join("clf.json"),
            label_encoder: dir.join("encoder.json"),
        }
    }
}

/// The immutable inference context shared by every classification call.
pub struct ModelArtifacts {
    pub vectorizer: Box<dyn Vectorizer>,
    pub classifier: Box<dyn Classifier>,
    pub decoder: Box<dyn LabelDecoder>,
}

impl fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("vocabulary_size", &self.vectorizer.vocabulary_size())
            .field("feature_count", &self.classifier.feature_count())
            .field("label_count", &self.decoder.categories().len())
            .finish()
    }
}

impl ModelArtifacts {
    /// Assembles a context from already-built parts, checking they fit together.
    pub fn new(
        vectorizer: impl Vectorizer + 'static,
        classifier: impl Classifier + 'static,
        decoder: impl LabelDecoder + 'static,
    ) -> Result<Self, ArtifactError> {
        if vectorizer.vocabulary_size() != classifier.feature_count() {
            return Err(ArtifactError::DimensionMismatch {
                vectorizer: vectorizer.vocabulary_size(),
                classifier: classifier.feature_count(),
            });
        }

        let known = decoder.categories().len();
        let unknown: Vec<usize> = classifier
            .classes()
            .iter()
            .copied()
            .filter(|&index| index >= known)
            .collect();
        if !unknown.is_empty() {
            // Not fatal: those predictions surface as DecodeError per request.
            warn!(
                "Classifier can emit label indices {:?} unknown to the label encoder ({} labels). Artifacts may be out of sync.",
                unknown, known
            );
        }

        Ok(Self {
            vectorizer: Box::new(vectorizer),
            classifier: Box::new(classifier),
            decoder: Box::new(decoder),
        })
    }

    /// Reads, validates and cross-checks all three artifacts.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let vectorizer = TfidfVectorizer::from_artifact(read_artifact::<TfidfArtifact>(
            ArtifactKind::Vectorizer,
            &paths.vectorizer,
        )?)?;
        let classifier = LinearClassifier::from_artifact(read_artifact::<LinearArtifact>(
            ArtifactKind::Classifier,
            &paths.classifier,
        )?)?;
        let decoder = LabelEncoder::from_artifact(read_artifact::<LabelEncoderArtifact>(
            ArtifactKind::LabelEncoder,
            &paths.label_encoder,
        )?)?;

        let artifacts = Self::new(vectorizer, classifier, decoder)?;
        info!(
            "Model artifacts loaded: {} vocabulary terms, {} categories",
            artifacts.vectorizer.vocabulary_size(),
            artifacts.decoder.categories().len()
        );
        Ok(artifacts)
    }
}

fn read_artifact<T: DeserializeOwned>(kind: ArtifactKind, path: &Path) -> Result<T, ArtifactError> {
    info!("Loading {kind} from {}", path.display());
    let raw = fs::read(path).map_err(|source| ArtifactError::Io {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| ArtifactError::Parse {
        kind,
        path: path.to_path_buf(),
        source,
    })
}
