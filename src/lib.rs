//! # SpamSift
//!
//! A small web demo that labels text as spam or not spam.
//!
//! ## Features
//!
//! - TF-IDF vectorizer with a configurable analysis pipeline
//! - Multinomial Naive Bayes and logistic regression classifiers
//! - Checksummed binary artifact files, loaded once at startup
//! - Per-session model selection
//! - HTML front end served with axum

pub mod analysis;
pub mod artifact;
pub mod cli;
pub mod config;
pub mod error;
pub mod ml;
pub mod service;
pub mod web;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
