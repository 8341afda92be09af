//! One-shot analysis of a file or text.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::AsyncReadExt;

use super::{AnalyzeCommands, OutputArgs, OutputFormat};
use crate::cli::export::ExportDocument;
use crate::cli::progress::loading_spinner;
use crate::cli::render::{Presenter, Status};
use crate::config::Config;
use crate::http_client::AnalysisClient;
use crate::models::AnalysisInput;
use crate::services::{Resolution, SubmissionController, SubmissionState};

pub async fn cmd_analyze(config: &Config, command: AnalyzeCommands) -> anyhow::Result<()> {
    let (input, output) = match command {
        AnalyzeCommands::File { path, output } => {
            let input = AnalysisInput::from_path(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            (input, output)
        }
        AnalyzeCommands::Text { text, output } => {
            let text = if text == "-" {
                let mut buf = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buf)
                    .await
                    .context("Failed to read text from stdin")?;
                buf
            } else {
                text
            };
            (AnalysisInput::text(text), output)
        }
    };

    if !analyze_input(config, input, &output).await? {
        // Already reported by the presenter.
        std::process::exit(1);
    }
    Ok(())
}

/// Submit one input and print the outcome. Returns `false` when the
/// submission was rejected or failed; the notice has been printed by then.
async fn analyze_input(
    config: &Config,
    input: AnalysisInput,
    output: &OutputArgs,
) -> anyhow::Result<bool> {
    let presenter = Presenter::new(&config.display);
    let client = AnalysisClient::from_config(&config.service)?;
    let controller = SubmissionController::new(Arc::new(client));

    if let Some(notice) = presenter.render_input_notice(&input) {
        eprintln!("{}", notice);
    }

    let pending = match controller.submit(input.clone()) {
        Ok(pending) => pending,
        Err(err) => {
            eprintln!("{}", presenter.status_line(Status::Warn, err));
            return Ok(false);
        }
    };

    let spinner = loading_spinner(&format!(
        "Processing {} via {}",
        input.describe(),
        config.service.endpoint
    ));
    let resolution = pending.resolve().await;
    spinner.finish_and_clear();

    let state = match resolution {
        Resolution::Applied(state) => state,
        // Only this command holds the controller, so nothing can supersede it.
        Resolution::Superseded | Resolution::Disposed => controller.state(),
    };

    match state {
        SubmissionState::Succeeded(result) => {
            match output.format {
                OutputFormat::Text => println!("{}", presenter.render_result(&result)),
                OutputFormat::Json => {
                    println!("{}", ExportDocument::new(&input, &result).to_json()?)
                }
            }

            if let Some(ref path) = output.output {
                ExportDocument::new(&input, &result)
                    .write(path)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!(
                    "{}",
                    presenter.status_line(
                        Status::Success,
                        format!("Saved result to {}", presenter.highlight(path.display()))
                    )
                );
            }
            Ok(true)
        }
        SubmissionState::Failed(err) => {
            eprintln!("{}", presenter.render_failure(&err));
            Ok(false)
        }
        SubmissionState::Idle | SubmissionState::Loading => {
            anyhow::bail!("Submission did not complete")
        }
    }
}
