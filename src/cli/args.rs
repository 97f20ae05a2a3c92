//! Command line argument parsing for the SpamSift CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactStore;
use crate::config::ServiceConfig;
use crate::ml::ModelKind;

/// SpamSift - label text as spam or not spam with pre-trained models
#[derive(Parser, Debug, Clone)]
#[command(name = "spamsift")]
#[command(about = "Spam detection demo backed by pre-trained classifiers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpamSiftArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpamSiftArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the web page
    Serve(ServeArgs),

    /// Classify a piece of text
    Classify(ClassifyArgs),

    /// Show the status of every artifact
    Inspect(InspectArgs),
}

/// Where to find the artifacts
#[derive(Parser, Debug, Clone)]
pub struct ArtifactDirArgs {
    /// Directory holding the artifact files (default: the executable's directory)
    #[arg(long, env = "SPAMSIFT_ARTIFACT_DIR", value_name = "DIR")]
    pub artifact_dir: Option<PathBuf>,
}

impl ArtifactDirArgs {
    pub fn resolve(&self) -> PathBuf {
        self.artifact_dir
            .clone()
            .unwrap_or_else(ArtifactStore::default_dir)
    }
}

/// Arguments for serving the page
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub artifacts: ArtifactDirArgs,

    /// JSON config file; flags given on the command line take precedence
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "SPAMSIFT_BIND", value_name = "ADDR")]
    pub bind: Option<String>,

    /// Seconds a session may stay idle before it is dropped
    #[arg(long, value_name = "SECS")]
    pub session_ttl_secs: Option<u64>,
}

impl ServeArgs {
    /// Merge the flags over the config file or the defaults.
    pub fn to_config(&self) -> crate::error::Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::load(path)?,
            None => ServiceConfig::default(),
        };
        if let Some(dir) = &self.artifacts.artifact_dir {
            config.artifact_dir = dir.clone();
        }
        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
        if let Some(ttl) = self.session_ttl_secs {
            config.session_ttl_secs = ttl;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for classifying text
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub artifacts: ArtifactDirArgs,

    /// Model to classify with
    #[arg(short, long)]
    pub model: ModelChoice,

    /// Text to classify (read from stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,
}

/// Arguments for inspecting artifacts
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub artifacts: ArtifactDirArgs,
}

/// Model names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelChoice {
    /// Multinomial Naive Bayes
    Nb,
    /// Logistic regression
    Lr,
}

impl From<ModelChoice> for ModelKind {
    fn from(choice: ModelChoice) -> Self {
        match choice {
            ModelChoice::Nb => ModelKind::NaiveBayes,
            ModelChoice::Lr => ModelKind::LogisticRegression,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SESSION_TTL_SECS;
    use clap::Parser;

    #[test]
    fn test_classify_command() {
        let args = SpamSiftArgs::try_parse_from([
            "spamsift",
            "classify",
            "--model",
            "nb",
            "--artifact-dir",
            "/srv/models",
            "free money",
        ])
        .unwrap();

        if let Command::Classify(classify_args) = args.command {
            assert_eq!(ModelKind::from(classify_args.model), ModelKind::NaiveBayes);
            assert_eq!(classify_args.text.as_deref(), Some("free money"));
            assert_eq!(classify_args.artifacts.resolve(), PathBuf::from("/srv/models"));
        } else {
            panic!("Expected Classify command");
        }
    }

    #[test]
    fn test_serve_command_overrides() {
        let args = SpamSiftArgs::try_parse_from([
            "spamsift",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--session-ttl-secs",
            "120",
        ])
        .unwrap();

        if let Command::Serve(serve_args) = args.command {
            let config = serve_args.to_config().unwrap();
            assert_eq!(config.bind, "0.0.0.0:8080");
            assert_eq!(config.session_ttl_secs, 120);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_serve_defaults() {
        let args = SpamSiftArgs::try_parse_from(["spamsift", "serve"]).unwrap();
        if let Command::Serve(serve_args) = args.command {
            assert!(serve_args.config.is_none());
            let config = serve_args.to_config().unwrap();
            assert_eq!(config.session_ttl_secs, DEFAULT_SESSION_TTL_SECS);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        assert!(
            SpamSiftArgs::try_parse_from(["spamsift", "classify", "--model", "svm", "hi"]).is_err()
        );
    }

    #[test]
    fn test_verbosity_levels() {
        let args = SpamSiftArgs::try_parse_from(["spamsift", "inspect"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = SpamSiftArgs::try_parse_from(["spamsift", "-vvv", "inspect"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = SpamSiftArgs::try_parse_from(["spamsift", "-vv", "-q", "inspect"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }
}
