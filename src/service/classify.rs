//! Classification service: `(text, selection) -> label`.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::artifact::{ArtifactKind, ArtifactSlot, ArtifactStore};
use crate::ml::{Classifier, Label, ModelKind};

/// The user's current model choice; `None` until a model is picked.
pub type ModelSelection = Option<ModelKind>;

/// How a notice is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The user can fix it by changing their input.
    Warning,
    /// The service cannot classify until it is redeployed.
    Error,
}

/// A user-visible advisory returned instead of a label.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
pub enum Notice {
    #[error("empty input")]
    EmptyInput,

    #[error("no model selected")]
    NoModelSelected,

    #[error("classification unavailable: {reason}")]
    ClassificationUnavailable { reason: String },

    #[error("failed to load {kind} artifact: {reason}")]
    ArtifactLoad { kind: ArtifactKind, reason: String },
}

impl Notice {
    fn unavailable(kind: ArtifactKind, reason: impl std::fmt::Display) -> Self {
        Notice::ClassificationUnavailable {
            reason: format!("{kind} artifact: {reason}"),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Notice::EmptyInput | Notice::NoModelSelected => Severity::Warning,
            Notice::ClassificationUnavailable { .. } | Notice::ArtifactLoad { .. } => {
                Severity::Error
            }
        }
    }

    /// Sentence shown on the page.
    pub fn message(&self) -> String {
        match self {
            Notice::EmptyInput => "Please enter some text.".to_string(),
            Notice::NoModelSelected => "Please select a model first.".to_string(),
            Notice::ClassificationUnavailable { reason } => {
                format!("Classification is unavailable ({reason}).")
            }
            Notice::ArtifactLoad { kind, reason } => {
                format!("Error loading the {kind} model file: {reason}")
            }
        }
    }
}

/// A single submit: the text and the selection at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    pub text: String,
    pub selection: ModelSelection,
}

impl ClassificationRequest {
    pub fn new<S: Into<String>>(text: S, selection: ModelSelection) -> Self {
        Self {
            text: text.into(),
            selection,
        }
    }
}

/// Labels text with one of the loaded classifiers.
///
/// The service only reads the artifact store; it can be shared freely.
#[derive(Debug, Clone)]
pub struct ClassificationService {
    store: Arc<ArtifactStore>,
}

impl ClassificationService {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Classify a request.
    pub fn handle(&self, request: &ClassificationRequest) -> Result<Label, Notice> {
        self.classify(&request.text, request.selection)
    }

    /// Classify `text` with the selected model.
    ///
    /// Checks run in order: empty input, missing selection, then the
    /// availability of the vectorizer and the selected classifier.
    pub fn classify(&self, text: &str, selection: ModelSelection) -> Result<Label, Notice> {
        if text.trim().is_empty() {
            return Err(Notice::EmptyInput);
        }
        let Some(kind) = selection else {
            return Err(Notice::NoModelSelected);
        };

        let vectorizer = match self.store.vectorizer() {
            ArtifactSlot::Loaded(vectorizer) => vectorizer,
            ArtifactSlot::Failed(reason) => {
                return Err(Notice::unavailable(ArtifactKind::Vectorizer, reason));
            }
        };

        let classifier: &dyn Classifier = match kind {
            ModelKind::NaiveBayes => loaded(self.store.naive_bayes(), kind)?,
            ModelKind::LogisticRegression => loaded(self.store.logistic_regression(), kind)?,
        };

        let features = vectorizer
            .transform(text)
            .map_err(|e| Notice::unavailable(ArtifactKind::Vectorizer, e))?;
        let prediction = classifier
            .predict(&features)
            .map_err(|e| Notice::unavailable(kind.artifact_kind(), e))?;

        let label = Label::from_prediction(prediction).ok_or_else(|| {
            Notice::unavailable(
                kind.artifact_kind(),
                format!("unexpected prediction {prediction}"),
            )
        })?;

        log::debug!(
            "Classified {} chars with {}: {label}",
            text.chars().count(),
            classifier.name()
        );
        Ok(label)
    }
}

fn loaded<C: Classifier + 'static>(
    slot: &ArtifactSlot<C>,
    kind: ModelKind,
) -> Result<&dyn Classifier, Notice> {
    match slot {
        ArtifactSlot::Loaded(model) => Ok(model.as_ref()),
        ArtifactSlot::Failed(reason) => Err(Notice::unavailable(kind.artifact_kind(), reason)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalyzerConfig;
    use crate::ml::{LogisticRegressionClassifier, NaiveBayesClassifier, TfIdfVectorizer};

    // vocabulary: cash, lunch, prize, team
    fn service(vectorizer: ArtifactSlot<TfIdfVectorizer>) -> ClassificationService {
        let naive_bayes = NaiveBayesClassifier::new(
            vec![0, 1],
            vec![0.5_f64.ln(); 2],
            vec![
                vec![0.05_f64.ln(), 0.45_f64.ln(), 0.05_f64.ln(), 0.45_f64.ln()],
                vec![0.45_f64.ln(), 0.05_f64.ln(), 0.45_f64.ln(), 0.05_f64.ln()],
            ],
        )
        .unwrap();
        let logistic =
            LogisticRegressionClassifier::new(vec![0, 1], vec![3.0, -3.0, 3.0, -3.0], -0.5)
                .unwrap();

        ClassificationService::new(Arc::new(ArtifactStore::from_slots(
            vectorizer,
            ArtifactSlot::loaded(naive_bayes),
            ArtifactSlot::loaded(logistic),
        )))
    }

    fn vectorizer() -> ArtifactSlot<TfIdfVectorizer> {
        let mut vectorizer = TfIdfVectorizer::new(AnalyzerConfig::default()).unwrap();
        vectorizer
            .fit(&["cash prize".to_string(), "team lunch".to_string()])
            .unwrap();
        ArtifactSlot::loaded(vectorizer)
    }

    #[test]
    fn test_precondition_order() {
        let service = service(vectorizer());

        assert_eq!(service.classify("", None), Err(Notice::EmptyInput));
        assert_eq!(
            service.classify("   \n\t", Some(ModelKind::NaiveBayes)),
            Err(Notice::EmptyInput)
        );
        assert_eq!(
            service.classify("free money now", None),
            Err(Notice::NoModelSelected)
        );
        assert_eq!(Notice::EmptyInput.to_string(), "empty input");
        assert_eq!(Notice::NoModelSelected.to_string(), "no model selected");
    }

    #[test]
    fn test_dispatch() {
        let service = service(vectorizer());

        for kind in ModelKind::ALL {
            assert_eq!(service.classify("Cash PRIZE!", Some(kind)), Ok(Label::Spam));
            assert_eq!(service.classify("team lunch?", Some(kind)), Ok(Label::NotSpam));
        }

        let request = ClassificationRequest::new("cash", Some(ModelKind::LogisticRegression));
        assert_eq!(service.handle(&request), Ok(Label::Spam));
    }

    #[test]
    fn test_failed_vectorizer_makes_classification_unavailable() {
        let service = service(ArtifactSlot::Failed("file not found".to_string()));

        let result = service.classify("cash prize", Some(ModelKind::NaiveBayes));
        match result {
            Err(notice @ Notice::ClassificationUnavailable { .. }) => {
                assert_eq!(notice.severity(), Severity::Error);
                assert!(notice.to_string().contains("vectorizer artifact: file not found"));
            }
            other => panic!("expected unavailable notice, got {other:?}"),
        }

        // input checks still come first
        assert_eq!(
            service.classify(" ", Some(ModelKind::NaiveBayes)),
            Err(Notice::EmptyInput)
        );
    }

    #[test]
    fn test_notice_messages() {
        assert_eq!(Notice::EmptyInput.message(), "Please enter some text.");
        assert_eq!(Notice::NoModelSelected.severity(), Severity::Warning);
        let notice = Notice::ArtifactLoad {
            kind: ArtifactKind::NaiveBayes,
            reason: "checksum mismatch".to_string(),
        };
        assert_eq!(
            notice.to_string(),
            "failed to load naive bayes artifact: checksum mismatch"
        );
    }
}
