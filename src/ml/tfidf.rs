//! TF-IDF vectorizer for text feature extraction.
//!
//! The vocabulary and idf weights are learned offline; at serving time the
//! vectorizer is loaded from an artifact and only [`TfIdfVectorizer::transform`]
//! is called. [`TfIdfVectorizer::fit`] exists for tooling and fixtures.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, AnalyzerConfig, PipelineAnalyzer};
use crate::artifact::{Artifact, ArtifactKind, decode_serde, encode_serde};
use crate::error::{Result, SpamSiftError};

/// Row normalization applied after idf weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Norm {
    /// Unit euclidean length.
    #[default]
    L2,
    /// Unit sum of absolute values.
    L1,
    /// No normalization.
    None,
}

/// Serialized form of a [`TfIdfVectorizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfState {
    /// Vocabulary terms; a term's position is its feature index.
    pub terms: Vec<String>,
    /// Inverse document frequency for each term.
    pub idf: Vec<f64>,
    /// Analysis settings used when the vocabulary was built.
    pub analyzer: AnalyzerConfig,
    /// Replace raw counts with `1 + ln(count)`.
    pub sublinear_tf: bool,
    pub norm: Norm,
}

/// TF-IDF vectorizer for text feature extraction.
pub struct TfIdfVectorizer {
    /// Vocabulary: word -> index mapping.
    vocabulary: HashMap<String, usize>,
    /// Terms ordered by index.
    terms: Vec<String>,
    /// Inverse document frequency for each word.
    idf: Vec<f64>,
    sublinear_tf: bool,
    norm: Norm,
    analyzer_config: AnalyzerConfig,
    /// Analyzer for tokenization.
    analyzer: PipelineAnalyzer,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("sublinear_tf", &self.sublinear_tf)
            .field("norm", &self.norm)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create an empty vectorizer with the given analysis settings.
    pub fn new(analyzer_config: AnalyzerConfig) -> Result<Self> {
        let analyzer = analyzer_config.build()?;
        Ok(Self {
            vocabulary: HashMap::new(),
            terms: Vec::new(),
            idf: Vec::new(),
            sublinear_tf: false,
            norm: Norm::default(),
            analyzer_config,
            analyzer,
        })
    }

    /// Use `1 + ln(count)` instead of raw counts.
    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    /// Set the row normalization.
    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    /// Fit the vectorizer on training documents.
    ///
    /// Terms are indexed in lexicographic order so the same corpus always
    /// produces the same feature layout.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        let n_documents = documents.len();
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let unique_tokens: HashSet<String> = self.tokenize(doc)?.into_iter().collect();
            for token in unique_tokens {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        let mut terms = Vec::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (term, df) in document_frequency {
            // IDF = ln((N + 1) / (df + 1)) + 1
            idf.push(((n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
            terms.push(term);
        }

        self.vocabulary = index_terms(&terms)?;
        self.terms = terms;
        self.idf = idf;

        Ok(())
    }

    /// Rebuild a vectorizer from its serialized form.
    pub fn from_state(state: TfIdfState) -> Result<Self> {
        if state.terms.len() != state.idf.len() {
            return Err(SpamSiftError::model(format!(
                "vectorizer has {} terms but {} idf weights",
                state.terms.len(),
                state.idf.len()
            )));
        }
        if let Some(weight) = state.idf.iter().find(|w| !w.is_finite()) {
            return Err(SpamSiftError::model(format!(
                "vectorizer idf weight {weight} is not finite"
            )));
        }

        let analyzer = state.analyzer.build()?;
        Ok(Self {
            vocabulary: index_terms(&state.terms)?,
            terms: state.terms,
            idf: state.idf,
            sublinear_tf: state.sublinear_tf,
            norm: state.norm,
            analyzer_config: state.analyzer,
            analyzer,
        })
    }

    /// Snapshot the learned parameters.
    pub fn to_state(&self) -> TfIdfState {
        TfIdfState {
            terms: self.terms.clone(),
            idf: self.idf.clone(),
            analyzer: self.analyzer_config.clone(),
            sublinear_tf: self.sublinear_tf,
            norm: self.norm,
        }
    }

    /// Transform a document into a TF-IDF feature vector.
    pub fn transform(&self, document: &str) -> Result<Vec<f64>> {
        let tokens = self.tokenize(document)?;
        let mut features = vec![0.0_f64; self.vocabulary.len()];

        // Count term frequencies
        for token in &tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                features[idx] += 1.0;
            }
        }

        if self.sublinear_tf {
            for count in features.iter_mut().filter(|c| **c > 0.0) {
                *count = 1.0 + count.ln();
            }
        }

        // Apply IDF
        for (idx, value) in features.iter_mut().enumerate() {
            *value *= self.idf[idx];
        }

        let length = match self.norm {
            Norm::L2 => features.iter().map(|x| x * x).sum::<f64>().sqrt(),
            Norm::L1 => features.iter().map(|x| x.abs()).sum::<f64>(),
            Norm::None => 1.0,
        };
        if length > 0.0 && length != 1.0 {
            for value in &mut features {
                *value /= length;
            }
        }

        Ok(features)
    }

    /// Tokenize a document, skipping tokens marked as stopped.
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let tokens: Vec<String> = self
            .analyzer
            .analyze(text)?
            .filter(|token| !token.is_stopped())
            .map(|token| token.text)
            .collect();
        Ok(tokens)
    }

    /// Get the size of the vocabulary, which is the feature dimension.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Feature index of a term, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Vocabulary terms ordered by feature index.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

fn index_terms(terms: &[String]) -> Result<HashMap<String, usize>> {
    let mut vocabulary = HashMap::with_capacity(terms.len());
    for (idx, term) in terms.iter().enumerate() {
        if vocabulary.insert(term.clone(), idx).is_some() {
            return Err(SpamSiftError::model(format!(
                "vectorizer vocabulary lists \"{term}\" twice"
            )));
        }
    }
    Ok(vocabulary)
}

impl Artifact for TfIdfVectorizer {
    const KIND: ArtifactKind = ArtifactKind::Vectorizer;

    fn encode_body(&self) -> Result<Vec<u8>> {
        encode_serde(&self.to_state())
    }

    fn decode_body(bytes: &[u8]) -> Result<Self> {
        Self::from_state(decode_serde(bytes)?)
    }
}
