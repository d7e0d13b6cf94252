//! Frozen linear discriminant classifier.
//!
//! One weight row per class (or a single row for a two-class model).
//! Prediction is the arg-max of `coef · x + intercept`; ties go to the
//! lowest row. There is no "unknown" output: every input gets a label.

use serde::{Deserialize, Serialize};

use crate::classification::artifacts::{ArtifactError, ArtifactKind};
use crate::models::FeatureVector;

/// Maps a feature vector to a label index from the trained label space.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> usize;

    /// Feature width the model was trained on.
    fn feature_count(&self) -> usize;

    /// Every label index `predict` can return.
    fn classes(&self) -> &[usize];
}

/// Serialized form of the fitted classifier (`clf.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    pub format_version: u32,
    pub classes: Vec<usize>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

#[derive(Debug)]
pub struct LinearClassifier {
    classes: Vec<usize>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

impl LinearClassifier {
    pub fn from_artifact(artifact: LinearArtifact) -> Result<Self, ArtifactError> {
        let kind = ArtifactKind::Classifier;
        ArtifactError::check_version(kind, artifact.format_version)?;

        let rows = artifact.coef.len();
        let width = artifact.coef.first().map(Vec::len).unwrap_or(0);
        if rows == 0 || width == 0 {
            return Err(ArtifactError::invalid(kind, "coef matrix is empty"));
        }
        if artifact.coef.iter().any(|row| row.len() != width) {
            return Err(ArtifactError::invalid(kind, "coef rows have unequal lengths"));
        }
        if artifact.intercept.len() != rows {
            return Err(ArtifactError::invalid(
                kind,
                format!(
                    "intercept has {} entries for {rows} coef rows",
                    artifact.intercept.len()
                ),
            ));
        }

        let expected_classes = if rows == 1 { 2 } else { rows };
        if artifact.classes.len() != expected_classes {
            return Err(ArtifactError::invalid(
                kind,
                format!(
                    "{} classes listed, {expected_classes} expected for {rows} coef rows",
                    artifact.classes.len()
                ),
            ));
        }

        let finite = artifact
            .coef
            .iter()
            .flatten()
            .chain(&artifact.intercept)
            .all(|w| w.is_finite());
        if !finite {
            return Err(ArtifactError::invalid(kind, "weights contain non-finite values"));
        }

        Ok(Self {
            classes: artifact.classes,
            coef: artifact.coef,
            intercept: artifact.intercept,
        })
    }

    /// One score per coef row.
    pub fn decision_function(&self, features: &FeatureVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| {
                row.iter()
                    .zip(features.values())
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
                    + bias
            })
            .collect()
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &FeatureVector) -> usize {
        let scores = self.decision_function(features);

        if let [score] = scores.as_slice() {
            return if *score > 0.0 {
                self.classes[1]
            } else {
                self.classes[0]
            };
        }

        let mut best = 0;
        for (row, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = row;
            }
        }
        self.classes[best]
    }

    fn feature_count(&self) -> usize {
        self.coef[0].len()
    }

    fn classes(&self) -> &[usize] {
        &self.classes
    }
}
