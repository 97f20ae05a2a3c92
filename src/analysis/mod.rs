//! Text analysis module for SpamSift.
//!
//! Tokenization and token filtering used by the TF-IDF vectorizer to turn a
//! raw message into the terms its vocabulary was built from.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::{Analyzer, AnalyzerConfig, PipelineAnalyzer, StopWords};
pub use token::{Token, TokenStream};
pub use token_filter::{Filter, LowercaseFilter, StopFilter};
pub use tokenizer::{RegexTokenizer, Tokenizer};
