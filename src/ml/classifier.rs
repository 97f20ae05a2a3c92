//! Classifier trait and the closed set of models the service can dispatch to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactKind;
use crate::error::Result;

/// Binary classifier over a dense feature vector.
///
/// Implementations are immutable once loaded, so a single instance can be
/// shared across every request.
pub trait Classifier: Send + Sync {
    /// Predict the class label for a feature vector.
    ///
    /// # Arguments
    /// * `features` - Output of the vectorizer the model was trained with
    ///
    /// # Returns
    /// One of the labels in [`classes`](Self::classes)
    fn predict(&self, features: &[f64]) -> Result<i64>;

    /// Number of features the model expects.
    fn n_features(&self) -> usize;

    /// Class labels known to the model, in training order.
    fn classes(&self) -> &[i64];

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &'static str;
}

/// The models a user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Multinomial Naive Bayes.
    NaiveBayes,
    /// Binary logistic regression.
    LogisticRegression,
}

impl ModelKind {
    /// Every selectable model, in display order.
    pub const ALL: [ModelKind; 2] = [ModelKind::NaiveBayes, ModelKind::LogisticRegression];

    /// Short tag used in URLs and on the command line.
    pub fn tag(self) -> &'static str {
        match self {
            ModelKind::NaiveBayes => "nb",
            ModelKind::LogisticRegression => "lr",
        }
    }

    /// Parse a short tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "nb" => Some(ModelKind::NaiveBayes),
            "lr" => Some(ModelKind::LogisticRegression),
            _ => None,
        }
    }

    /// Human readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::NaiveBayes => "Naïve Bayes",
            ModelKind::LogisticRegression => "Logistic Regression",
        }
    }

    /// The artifact that holds this model.
    pub fn artifact_kind(self) -> ArtifactKind {
        match self {
            ModelKind::NaiveBayes => ArtifactKind::NaiveBayes,
            ModelKind::LogisticRegression => ArtifactKind::LogisticRegression,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Classification outcome shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Spam,
    NotSpam,
}

impl Label {
    /// Map a raw model prediction to a label.
    ///
    /// Only `1` (spam) and `0` (not spam) are valid predictions.
    pub fn from_prediction(prediction: i64) -> Option<Self> {
        match prediction {
            1 => Some(Label::Spam),
            0 => Some(Label::NotSpam),
            _ => None,
        }
    }

    /// CSS class used when rendering the label.
    pub fn css_class(self) -> &'static str {
        match self {
            Label::Spam => "spam",
            Label::NotSpam => "not-spam",
        }
    }

    /// Text shown to the user.
    pub fn display_text(self) -> &'static str {
        match self {
            Label::Spam => "Spam",
            Label::NotSpam => "Not Spam",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}
