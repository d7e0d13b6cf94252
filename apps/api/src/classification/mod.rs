// Résumé classification: normalization, frozen model artifacts, and the
// orchestrating pipeline. Artifacts are loaded once in main and shared
// read-only through AppState.

pub mod artifacts;
pub mod classifier;
pub mod handlers;
pub mod label_decoder;
pub mod normalizer;
pub mod pipeline;
pub mod vectorizer;

pub use artifacts::{ArtifactPaths, ModelArtifacts};
pub use pipeline::{ClassificationPipeline, ResumeClassifier};
