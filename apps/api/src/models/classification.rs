use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::DocumentFormat;

/// A job category drawn from the label space fixed at training time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dense term-weight vector. Its length always equals the vocabulary size of
/// the vectorizer that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of non-zero weights, i.e. vocabulary terms present in the text.
    pub fn active_terms(&self) -> usize {
        self.0.iter().filter(|w| **w != 0.0).count()
    }
}

/// Result of one end-to-end classification.
#[derive(Debug, Clone)]
pub struct Classification {
    pub category: Category,
    pub format: DocumentFormat,
    pub extracted_text: String,
    pub normalized_chars: usize,
}
