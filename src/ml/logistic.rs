//! Binary logistic regression classifier.

use serde::{Deserialize, Serialize};

use crate::artifact::{Artifact, ArtifactKind, decode_serde, encode_serde};
use crate::error::{Result, SpamSiftError};
use crate::ml::classifier::Classifier;

/// Binary logistic regression.
///
/// Predicts `classes[1]` when `coef · x + intercept > 0`, `classes[0]`
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionClassifier {
    classes: Vec<i64>,
    coef: Vec<f64>,
    intercept: f64,
}

impl LogisticRegressionClassifier {
    /// Create a classifier from learned parameters.
    pub fn new(classes: Vec<i64>, coef: Vec<f64>, intercept: f64) -> Result<Self> {
        let model = Self {
            classes,
            coef,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.classes.len() != 2 {
            return Err(SpamSiftError::model(format!(
                "logistic regression model must have 2 classes, found {}",
                self.classes.len()
            )));
        }
        if !self.intercept.is_finite() || self.coef.iter().any(|w| !w.is_finite()) {
            return Err(SpamSiftError::model(
                "logistic regression weights must be finite",
            ));
        }
        Ok(())
    }

    /// Signed distance to the decision boundary.
    pub fn decision_function(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coef.len() {
            return Err(SpamSiftError::model(format!(
                "logistic regression model expects {} features, got {}",
                self.coef.len(),
                features.len()
            )));
        }

        Ok(self
            .coef
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept)
    }
}

impl Classifier for LogisticRegressionClassifier {
    fn predict(&self, features: &[f64]) -> Result<i64> {
        let score = self.decision_function(features)?;
        Ok(if score > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        })
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn name(&self) -> &'static str {
        "logistic_regression"
    }
}

impl Artifact for LogisticRegressionClassifier {
    const KIND: ArtifactKind = ArtifactKind::LogisticRegression;

    fn encode_body(&self) -> Result<Vec<u8>> {
        encode_serde(self)
    }

    fn decode_body(bytes: &[u8]) -> Result<Self> {
        let model: Self = decode_serde(bytes)?;
        model.validate()?;
        Ok(model)
    }
}
