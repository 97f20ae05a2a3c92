#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use spamsift::analysis::AnalyzerConfig;
use spamsift::artifact::{ArtifactKind, ArtifactStore, save_artifact};
use spamsift::ml::{LogisticRegressionClassifier, NaiveBayesClassifier, TfIdfVectorizer};
use spamsift::service::{ClassificationService, SessionStore};
use spamsift::web::AppState;

pub const SPAM_TERMS: [&str; 10] = [
    "win", "free", "iphone", "now", "money", "prize", "claim", "click", "offer", "cash",
];

pub const HAM_TERMS: [&str; 10] = [
    "meet", "lunch", "tomorrow", "noon", "meeting", "project", "thanks", "schedule", "report",
    "team",
];

const CORPUS: [&str; 6] = [
    "Win a free iPhone now",
    "Claim your prize money, click now",
    "Special cash offer for you",
    "Meet for lunch tomorrow at noon",
    "Project meeting: schedule and report",
    "Thanks team",
];

pub fn vectorizer() -> TfIdfVectorizer {
    let documents: Vec<String> = CORPUS.iter().map(|doc| doc.to_string()).collect();
    let mut vectorizer = TfIdfVectorizer::new(AnalyzerConfig::default()).unwrap();
    vectorizer.fit(&documents).unwrap();
    vectorizer
}

fn weights(vectorizer: &TfIdfVectorizer, spam: f64, ham: f64) -> Vec<f64> {
    vectorizer
        .terms()
        .iter()
        .map(|term| {
            if SPAM_TERMS.contains(&term.as_str()) {
                spam
            } else if HAM_TERMS.contains(&term.as_str()) {
                ham
            } else {
                0.0
            }
        })
        .collect()
}

pub fn naive_bayes(vectorizer: &TfIdfVectorizer) -> NaiveBayesClassifier {
    let likely = 0.2_f64.ln();
    let unlikely = 0.01_f64.ln();
    NaiveBayesClassifier::new(
        vec![0, 1],
        vec![0.5_f64.ln(); 2],
        vec![
            weights(vectorizer, unlikely, likely),
            weights(vectorizer, likely, unlikely),
        ],
    )
    .unwrap()
}

pub fn logistic_regression(vectorizer: &TfIdfVectorizer) -> LogisticRegressionClassifier {
    LogisticRegressionClassifier::new(vec![0, 1], weights(vectorizer, 3.0, -3.0), -0.5).unwrap()
}

/// Write all three artifacts into `dir`.
pub fn write_artifacts(dir: &Path) {
    let vectorizer = vectorizer();
    save_artifact(
        &vectorizer,
        dir.join(ArtifactKind::Vectorizer.file_name()),
    )
    .unwrap();
    save_artifact(
        &naive_bayes(&vectorizer),
        dir.join(ArtifactKind::NaiveBayes.file_name()),
    )
    .unwrap();
    save_artifact(
        &logistic_regression(&vectorizer),
        dir.join(ArtifactKind::LogisticRegression.file_name()),
    )
    .unwrap();
}

/// A temporary artifact directory with every artifact in place.
pub fn artifact_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path());
    dir
}

pub fn service(dir: &Path) -> ClassificationService {
    ClassificationService::new(Arc::new(ArtifactStore::open(dir)))
}

pub fn app_state(dir: &Path) -> Arc<AppState> {
    Arc::new(AppState::new(
        service(dir),
        SessionStore::new(std::time::Duration::from_secs(600)),
    ))
}
