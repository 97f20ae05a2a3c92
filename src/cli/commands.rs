//! Command implementations for the SpamSift CLI.

use std::io::{self, Read};
use std::sync::Arc;

use crate::artifact::ArtifactStore;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, SpamSiftError};
use crate::ml::ModelKind;
use crate::service::ClassificationService;

/// Execute a CLI command.
pub fn execute_command(args: SpamSiftArgs) -> Result<()> {
    match &args.command {
        Command::Serve(serve_args) => serve(serve_args, &args),
        Command::Classify(classify_args) => classify(classify_args, &args),
        Command::Inspect(inspect_args) => inspect(inspect_args, &args),
    }
}

/// Run the web service.
fn serve(args: &ServeArgs, cli_args: &SpamSiftArgs) -> Result<()> {
    let config = args.to_config()?;
    if cli_args.verbosity() > 0 {
        println!(
            "Serving on http://{} with artifacts from {}",
            config.bind,
            config.artifact_dir.display()
        );
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(crate::web::serve(&config))
}

/// Classify one piece of text.
fn classify(args: &ClassifyArgs, cli_args: &SpamSiftArgs) -> Result<()> {
    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let store = ArtifactStore::open(args.artifacts.resolve());
    let service = ClassificationService::new(Arc::new(store));
    let model = ModelKind::from(args.model);

    match service.classify(&text, Some(model)) {
        Ok(label) => output_result(
            "Classification result",
            &ClassificationOutput {
                model,
                outcome: Outcome::Label(label),
            },
            cli_args,
        ),
        Err(notice) => {
            if cli_args.output_format == OutputFormat::Json {
                output_result(
                    "Classification failed",
                    &ClassificationOutput {
                        model,
                        outcome: Outcome::Notice(notice.clone()),
                    },
                    cli_args,
                )?;
            }
            Err(SpamSiftError::from(notice))
        }
    }
}

/// Report the status of every artifact.
fn inspect(args: &InspectArgs, cli_args: &SpamSiftArgs) -> Result<()> {
    let store = ArtifactStore::open(args.artifacts.resolve());

    output_result(
        "Artifact status",
        &InspectionOutput {
            artifact_dir: store.dir().to_path_buf(),
            ready: store.is_ready(),
            artifacts: store.statuses(),
        },
        cli_args,
    )
}
