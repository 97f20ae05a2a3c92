//! Analyzer implementations.

#[allow(clippy::module_inception)]
pub mod analyzer;
pub mod config;
pub mod pipeline;

pub use analyzer::Analyzer;
pub use config::{AnalyzerConfig, StopWords};
pub use pipeline::PipelineAnalyzer;
