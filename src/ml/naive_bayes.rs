//! Multinomial Naive Bayes classifier.

use serde::{Deserialize, Serialize};

use crate::artifact::{Artifact, ArtifactKind, decode_serde, encode_serde};
use crate::error::{Result, SpamSiftError};
use crate::ml::classifier::Classifier;

/// Multinomial Naive Bayes over TF-IDF features.
///
/// The predicted class maximizes the joint log likelihood
/// `class_log_prior[c] + Σ_j x_j · feature_log_prob[c][j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesClassifier {
    classes: Vec<i64>,
    class_log_prior: Vec<f64>,
    /// One row per class, one column per feature.
    feature_log_prob: Vec<Vec<f64>>,
}

impl NaiveBayesClassifier {
    /// Create a classifier from learned parameters.
    pub fn new(
        classes: Vec<i64>,
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let model = Self {
            classes,
            class_log_prior,
            feature_log_prob,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(SpamSiftError::model("naive bayes model has no classes"));
        }
        if self.class_log_prior.len() != self.classes.len()
            || self.feature_log_prob.len() != self.classes.len()
        {
            return Err(SpamSiftError::model(format!(
                "naive bayes model has {} classes but {} priors and {} likelihood rows",
                self.classes.len(),
                self.class_log_prior.len(),
                self.feature_log_prob.len()
            )));
        }

        let n_features = self.feature_log_prob[0].len();
        if self.feature_log_prob.iter().any(|row| row.len() != n_features) {
            return Err(SpamSiftError::model(
                "naive bayes likelihood rows have different lengths",
            ));
        }
        if self.class_log_prior.iter().any(|p| !p.is_finite()) {
            return Err(SpamSiftError::model(
                "naive bayes class log priors must be finite",
            ));
        }
        // -inf is a zero probability; NaN is never valid.
        if self.feature_log_prob.iter().flatten().any(|lp| lp.is_nan()) {
            return Err(SpamSiftError::model(
                "naive bayes feature log probabilities contain NaN",
            ));
        }

        Ok(())
    }

    /// Joint log likelihood of every class, in class order.
    pub fn joint_log_likelihood(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.n_features() {
            return Err(SpamSiftError::model(format!(
                "naive bayes model expects {} features, got {}",
                self.n_features(),
                features.len()
            )));
        }

        Ok(self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, row)| {
                // Absent terms contribute nothing, even when their log probability is -inf.
                prior
                    + row
                        .iter()
                        .zip(features)
                        .filter(|(_, x)| **x != 0.0)
                        .map(|(lp, x)| lp * x)
                        .sum::<f64>()
            })
            .collect())
    }
}

impl Classifier for NaiveBayesClassifier {
    fn predict(&self, features: &[f64]) -> Result<i64> {
        let scores = self.joint_log_likelihood(features)?;

        // First maximum wins ties.
        let mut best = 0;
        for (idx, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = idx;
            }
        }

        Ok(self.classes[best])
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn name(&self) -> &'static str {
        "naive_bayes"
    }
}

impl Artifact for NaiveBayesClassifier {
    const KIND: ArtifactKind = ArtifactKind::NaiveBayes;

    fn encode_body(&self) -> Result<Vec<u8>> {
        encode_serde(self)
    }

    fn decode_body(bytes: &[u8]) -> Result<Self> {
        let model: Self = decode_serde(bytes)?;
        model.validate()?;
        Ok(model)
    }
}
