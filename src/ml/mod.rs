//! Machine learning models used by the classification service.
//!
//! Everything here is inference only: parameters are learned by an external
//! training pipeline and arrive as artifacts (see [`crate::artifact`]).
//!
//! # Example
//!
//! ```rust
//! use spamsift::analysis::AnalyzerConfig;
//! use spamsift::ml::{Classifier, Label, LogisticRegressionClassifier, TfIdfVectorizer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut vectorizer = TfIdfVectorizer::new(AnalyzerConfig::default())?;
//! vectorizer.fit(&["free prize".to_string(), "team lunch".to_string()])?;
//!
//! // terms: free, lunch, prize, team
//! let model = LogisticRegressionClassifier::new(vec![0, 1], vec![1.0, -1.0, 1.0, -1.0], 0.0)?;
//!
//! let features = vectorizer.transform("claim your free prize")?;
//! assert_eq!(Label::from_prediction(model.predict(&features)?), Some(Label::Spam));
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod logistic;
pub mod naive_bayes;
pub mod tfidf;

pub use classifier::{Classifier, Label, ModelKind};
pub use logistic::LogisticRegressionClassifier;
pub use naive_bayes::NaiveBayesClassifier;
pub use tfidf::{Norm, TfIdfState, TfIdfVectorizer};
