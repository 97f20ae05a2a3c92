//! Artifact store: loads the vectorizer and both classifiers once at startup.
//!
//! Loading never fails as a whole. Each artifact ends up in its own
//! [`ArtifactSlot`], either loaded or failed with a reason, and the service
//! checks the slots it needs before every classification.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::artifact::format::{Artifact, ArtifactKind, load_artifact};
use crate::ml::{
    Classifier, Label, LogisticRegressionClassifier, NaiveBayesClassifier, TfIdfVectorizer,
};
use crate::service::Notice;

/// Load result of a single artifact.
#[derive(Debug)]
pub enum ArtifactSlot<T> {
    /// The artifact was deserialized and validated.
    Loaded(Arc<T>),
    /// The artifact could not be used; the reason is shown to users.
    Failed(String),
}

impl<T> Clone for ArtifactSlot<T> {
    fn clone(&self) -> Self {
        match self {
            ArtifactSlot::Loaded(handle) => ArtifactSlot::Loaded(Arc::clone(handle)),
            ArtifactSlot::Failed(reason) => ArtifactSlot::Failed(reason.clone()),
        }
    }
}

impl<T> ArtifactSlot<T> {
    /// Wrap a loaded artifact.
    pub fn loaded(artifact: T) -> Self {
        ArtifactSlot::Loaded(Arc::new(artifact))
    }

    /// The loaded handle, if any.
    pub fn handle(&self) -> Option<&Arc<T>> {
        match self {
            ArtifactSlot::Loaded(handle) => Some(handle),
            ArtifactSlot::Failed(_) => None,
        }
    }

    /// The failure reason, if any.
    pub fn failure(&self) -> Option<&str> {
        match self {
            ArtifactSlot::Loaded(_) => None,
            ArtifactSlot::Failed(reason) => Some(reason),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ArtifactSlot::Loaded(_))
    }
}

impl<T: Artifact> ArtifactSlot<T> {
    /// Load an artifact file into a slot.
    pub fn load(path: &Path) -> Self {
        match load_artifact::<T, _>(path) {
            Ok(artifact) => {
                log::info!("Loaded {} artifact from {}", T::KIND, path.display());
                ArtifactSlot::loaded(artifact)
            }
            Err(e) => {
                log::error!(
                    "Failed to load {} artifact from {}: {e}",
                    T::KIND,
                    path.display()
                );
                ArtifactSlot::Failed(e.to_string())
            }
        }
    }
}

/// Status line for one artifact, used by `inspect` and `/health`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactStatus {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub loaded: bool,
    pub detail: String,
}

/// The three artifacts the service needs.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    vectorizer: ArtifactSlot<TfIdfVectorizer>,
    naive_bayes: ArtifactSlot<NaiveBayesClassifier>,
    logistic_regression: ArtifactSlot<LogisticRegressionClassifier>,
}

impl ArtifactStore {
    /// Load every artifact from `dir`.
    ///
    /// Missing or broken files leave a failed slot behind; this function does
    /// not return an error.
    pub fn open<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let path = |kind: ArtifactKind| dir.join(kind.file_name());

        let vectorizer = ArtifactSlot::load(&path(ArtifactKind::Vectorizer));
        let naive_bayes = ArtifactSlot::load(&path(ArtifactKind::NaiveBayes));
        let logistic_regression = ArtifactSlot::load(&path(ArtifactKind::LogisticRegression));

        let store = Self::with_dir(dir, vectorizer, naive_bayes, logistic_regression);
        if store.is_ready() {
            log::info!("All artifacts loaded from {}", store.dir.display());
        }
        store
    }

    /// Build a store from already loaded slots.
    ///
    /// Classifier slots go through the same consistency checks as in
    /// [`open`](Self::open).
    pub fn from_slots(
        vectorizer: ArtifactSlot<TfIdfVectorizer>,
        naive_bayes: ArtifactSlot<NaiveBayesClassifier>,
        logistic_regression: ArtifactSlot<LogisticRegressionClassifier>,
    ) -> Self {
        Self::with_dir(PathBuf::new(), vectorizer, naive_bayes, logistic_regression)
    }

    fn with_dir(
        dir: PathBuf,
        vectorizer: ArtifactSlot<TfIdfVectorizer>,
        naive_bayes: ArtifactSlot<NaiveBayesClassifier>,
        logistic_regression: ArtifactSlot<LogisticRegressionClassifier>,
    ) -> Self {
        let naive_bayes = check_classifier(ArtifactKind::NaiveBayes, naive_bayes, &vectorizer);
        let logistic_regression = check_classifier(
            ArtifactKind::LogisticRegression,
            logistic_regression,
            &vectorizer,
        );

        Self {
            dir,
            vectorizer,
            naive_bayes,
            logistic_regression,
        }
    }

    /// Default artifact location: the directory of the running executable.
    pub fn default_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Directory the artifacts were loaded from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn vectorizer(&self) -> &ArtifactSlot<TfIdfVectorizer> {
        &self.vectorizer
    }

    pub fn naive_bayes(&self) -> &ArtifactSlot<NaiveBayesClassifier> {
        &self.naive_bayes
    }

    pub fn logistic_regression(&self) -> &ArtifactSlot<LogisticRegressionClassifier> {
        &self.logistic_regression
    }

    /// Whether every artifact loaded.
    pub fn is_ready(&self) -> bool {
        self.vectorizer.is_loaded()
            && self.naive_bayes.is_loaded()
            && self.logistic_regression.is_loaded()
    }

    /// Per-artifact status, in load order.
    pub fn statuses(&self) -> Vec<ArtifactStatus> {
        let vectorizer_detail = self
            .vectorizer
            .handle()
            .map(|v| format!("{} terms", v.vocabulary_size()));

        vec![
            self.status(ArtifactKind::Vectorizer, &self.vectorizer, vectorizer_detail),
            self.status(
                ArtifactKind::NaiveBayes,
                &self.naive_bayes,
                self.naive_bayes.handle().map(|m| classifier_detail(m.as_ref())),
            ),
            self.status(
                ArtifactKind::LogisticRegression,
                &self.logistic_regression,
                self.logistic_regression
                    .handle()
                    .map(|m| classifier_detail(m.as_ref())),
            ),
        ]
    }

    fn status<T>(
        &self,
        kind: ArtifactKind,
        slot: &ArtifactSlot<T>,
        loaded_detail: Option<String>,
    ) -> ArtifactStatus {
        ArtifactStatus {
            kind,
            path: self.dir.join(kind.file_name()),
            loaded: slot.is_loaded(),
            detail: slot
                .failure()
                .map(str::to_string)
                .or(loaded_detail)
                .unwrap_or_default(),
        }
    }

    /// One notice per artifact that failed to load.
    pub fn notices(&self) -> Vec<Notice> {
        self.statuses()
            .into_iter()
            .filter(|status| !status.loaded)
            .map(|status| Notice::ArtifactLoad {
                kind: status.kind,
                reason: status.detail,
            })
            .collect()
    }
}

fn classifier_detail(model: &dyn Classifier) -> String {
    format!(
        "{} features, classes {:?}",
        model.n_features(),
        model.classes()
    )
}

/// Reject classifiers that cannot work with the loaded vectorizer or whose
/// predictions cannot be mapped to a label.
fn check_classifier<C: Classifier>(
    kind: ArtifactKind,
    slot: ArtifactSlot<C>,
    vectorizer: &ArtifactSlot<TfIdfVectorizer>,
) -> ArtifactSlot<C> {
    let ArtifactSlot::Loaded(model) = &slot else {
        return slot;
    };

    if let Some(class) = model
        .classes()
        .iter()
        .find(|class| Label::from_prediction(**class).is_none())
    {
        let reason = format!("class label {class} is neither 0 (not spam) nor 1 (spam)");
        log::error!("Rejecting {kind} artifact: {reason}");
        return ArtifactSlot::Failed(reason);
    }

    if let Some(vectorizer) = vectorizer.handle()
        && vectorizer.vocabulary_size() != model.n_features()
    {
        let reason = format!(
            "model expects {} features but the vectorizer produces {}",
            model.n_features(),
            vectorizer.vocabulary_size()
        );
        log::error!("Rejecting {kind} artifact: {reason}");
        return ArtifactSlot::Failed(reason);
    }

    slot
}
