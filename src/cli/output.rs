//! Output formatting for CLI commands.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::artifact::ArtifactStatus;
use crate::cli::args::{OutputFormat, SpamSiftArgs};
use crate::error::Result;
use crate::ml::{Label, ModelKind};
use crate::service::Notice;

/// Result of `classify`.
#[derive(Debug, Serialize)]
pub struct ClassificationOutput {
    pub model: ModelKind,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Label or notice.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Label(Label),
    Notice(Notice),
}

impl fmt::Display for ClassificationOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Label(label) => write!(f, "{label}"),
            Outcome::Notice(notice) => write!(f, "{}", notice.message()),
        }
    }
}

/// Result of `inspect`.
#[derive(Debug, Serialize)]
pub struct InspectionOutput {
    pub artifact_dir: PathBuf,
    pub ready: bool,
    pub artifacts: Vec<ArtifactStatus>,
}

impl fmt::Display for InspectionOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Artifact directory: {}", self.artifact_dir.display())?;
        for status in &self.artifacts {
            let state = if status.loaded { "ok" } else { "FAILED" };
            writeln!(f, "  {:<20} {:<7} {}", status.kind, state, status.detail)?;
        }
        write!(
            f,
            "Status: {}",
            if self.ready { "ready" } else { "not ready" }
        )
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + fmt::Display>(
    message: &str,
    result: &T,
    args: &SpamSiftArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: fmt::Display>(message: &str, result: &T, args: &SpamSiftArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    println!("{result}");
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SpamSiftArgs) -> Result<()> {
    println!("{}", to_json(result, args.pretty)?);
    Ok(())
}

fn to_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}
