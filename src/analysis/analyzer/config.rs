//! Serializable analyzer settings.
//!
//! A vectorizer artifact has to tokenize messages exactly as they were
//! tokenized when its vocabulary was built, so the analysis settings travel
//! inside the artifact as an [`AnalyzerConfig`] and the live
//! [`PipelineAnalyzer`] is rebuilt from it on load.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token_filter::{LowercaseFilter, StopFilter};
use crate::analysis::tokenizer::RegexTokenizer;
use crate::analysis::tokenizer::regex::DEFAULT_TOKEN_PATTERN;
use crate::error::Result;

/// Stop word handling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopWords {
    /// Keep every token.
    #[default]
    None,
    /// Drop the built-in English stop word list.
    English,
    /// Drop the given words.
    Custom(Vec<String>),
}

/// Settings for the analysis pipeline used by a vectorizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Regex whose matches become tokens.
    pub token_pattern: String,
    /// Lowercase tokens before lookup.
    pub lowercase: bool,
    /// Stop words removed after lowercasing.
    pub stop_words: StopWords,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            lowercase: true,
            stop_words: StopWords::None,
        }
    }
}

impl AnalyzerConfig {
    /// Build the analysis pipeline these settings describe.
    pub fn build(&self) -> Result<PipelineAnalyzer> {
        let tokenizer = Arc::new(RegexTokenizer::with_pattern(&self.token_pattern)?);
        let mut analyzer = PipelineAnalyzer::new(tokenizer);

        if self.lowercase {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
        }

        analyzer = match &self.stop_words {
            StopWords::None => analyzer,
            StopWords::English => analyzer.add_filter(Arc::new(StopFilter::new())),
            StopWords::Custom(words) => {
                analyzer.add_filter(Arc::new(StopFilter::from_words(words.iter().cloned())))
            }
        };

        Ok(analyzer.with_name("message"))
    }
}
