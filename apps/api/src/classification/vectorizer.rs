//! Frozen TF-IDF term-weighting transform.
//!
//! Reproduces the inference half of a fitted TF-IDF vectorizer: lowercase,
//! tokenize on runs of two or more word characters, drop stop words, build
//! word n-grams, count in-vocabulary terms, weight by idf, normalize.
//! Vocabulary and idf come from the artifact and are never refit.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::classification::artifacts::{ArtifactError, ArtifactKind};
use crate::classification::normalizer::NormalizedText;
use crate::models::FeatureVector;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Maps normalized text to a fixed-length feature vector.
pub trait Vectorizer: Send + Sync {
    fn transform(&self, text: &NormalizedText) -> FeatureVector;

    /// Length of every vector this transform produces.
    fn vocabulary_size(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized form of the fitted transform (`tfidf.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfArtifact {
    pub format_version: u32,
    /// term → feature column
    pub vocabulary: HashMap<String, usize>,
    /// One weight per feature column.
    pub idf: Vec<f64>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default)]
    pub stop_words: Vec<String>,
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

#[derive(Debug)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    lowercase: bool,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Option<Norm>,
    stop_words: HashSet<String>,
}

impl TfidfVectorizer {
    /// Validates the artifact's shape and builds the transform.
    pub fn from_artifact(artifact: TfidfArtifact) -> Result<Self, ArtifactError> {
        let kind = ArtifactKind::Vectorizer;
        ArtifactError::check_version(kind, artifact.format_version)?;

        if artifact.vocabulary.is_empty() {
            return Err(ArtifactError::invalid(kind, "vocabulary is empty"));
        }
        if artifact.idf.len() != artifact.vocabulary.len() {
            return Err(ArtifactError::invalid(
                kind,
                format!(
                    "idf has {} weights for {} vocabulary terms",
                    artifact.idf.len(),
                    artifact.vocabulary.len()
                ),
            ));
        }

        let mut seen = vec![false; artifact.idf.len()];
        for (term, &column) in &artifact.vocabulary {
            match seen.get_mut(column) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(ArtifactError::invalid(
                        kind,
                        format!("column {column} is assigned to more than one term ('{term}')"),
                    ))
                }
                None => {
                    return Err(ArtifactError::invalid(
                        kind,
                        format!("term '{term}' maps to out-of-range column {column}"),
                    ))
                }
            }
        }

        if artifact.idf.iter().any(|w| !w.is_finite()) {
            return Err(ArtifactError::invalid(kind, "idf contains non-finite weights"));
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ArtifactError::invalid(
                kind,
                format!("invalid ngram_range ({min_n}, {max_n})"),
            ));
        }

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            lowercase: artifact.lowercase,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            stop_words: artifact.stop_words.into_iter().collect(),
        })
    }

    /// Splits text into the terms the vocabulary is keyed on.
    fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        };

        let tokens: Vec<&str> = TOKEN
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, text: &NormalizedText) -> FeatureVector {
        let mut weights = vec![0.0_f64; self.idf.len()];
        for term in self.analyze(text.as_str()) {
            if let Some(&column) = self.vocabulary.get(&term) {
                weights[column] += 1.0;
            }
        }

        for (weight, idf) in weights.iter_mut().zip(&self.idf) {
            if *weight > 0.0 {
                if self.sublinear_tf {
                    *weight = 1.0 + weight.ln();
                }
                *weight *= idf;
            }
        }

        let length = match self.norm {
            Some(Norm::L2) => weights.iter().map(|w| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => weights.iter().map(|w| w.abs()).sum::<f64>(),
            None => 0.0,
        };
        if length > 0.0 {
            weights.iter_mut().for_each(|w| *w /= length);
        }

        FeatureVector::new(weights)
    }

    fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }
}
