use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::classification::ArtifactPaths;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub model_dir: PathBuf,
    pub tfidf_path: PathBuf,
    pub classifier_path: PathBuf,
    pub encoder_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let model_dir = PathBuf::from(
            lookup("MODEL_DIR").context("Required environment variable 'MODEL_DIR' is not set")?,
        );
        let defaults = ArtifactPaths::in_dir(&model_dir);

        Ok(Config {
            tfidf_path: lookup("TFIDF_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.vectorizer),
            classifier_path: lookup("CLASSIFIER_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.classifier),
            encoder_path: lookup("ENCODER_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.label_encoder),
            model_dir,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            vectorizer: self.tfidf_path.clone(),
            classifier: self.classifier_path.clone(),
            label_encoder: self.encoder_path.clone(),
        }
    }
}
