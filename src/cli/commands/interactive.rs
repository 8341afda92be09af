//! Line-by-line analysis session.
//!
//! Each line read from stdin is submitted as text. Submitting while a request
//! is still in flight supersedes it: the earlier response is discarded when it
//! arrives, whatever order the responses come back in.

use std::io::Write;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::cli::render::{Presenter, Status};
use crate::config::Config;
use crate::http_client::{AnalysisClient, AnalysisTransport};
use crate::models::AnalysisInput;
use crate::services::{Resolution, SubmissionController, SubmissionState};

pub async fn cmd_interactive(config: &Config) -> anyhow::Result<()> {
    let presenter = Presenter::new(&config.display);
    let client = AnalysisClient::from_config(&config.service)?;
    let controller = SubmissionController::new(Arc::new(client));

    eprintln!(
        "{}",
        presenter.status_line(
            Status::Info,
            format!(
                "Connected to {} (one document per line, Ctrl-D to finish)",
                presenter.highlight(&config.service.endpoint)
            )
        )
    );

    let stdin = BufReader::new(tokio::io::stdin());
    run_session(controller, &presenter, stdin, &mut std::io::stdout()).await
}

/// Drive a session until input ends and the latest submission has settled.
///
/// Superseded requests are not waited for: once input is exhausted and the
/// state has left `Loading`, whatever is still in flight can only be discarded.
async fn run_session<T, R, W>(
    controller: SubmissionController<T>,
    presenter: &Presenter,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    T: AnalysisTransport + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut observer = controller.subscribe();
    let mut lines = input.lines();
    let mut in_flight = FuturesUnordered::new();
    let mut eof = false;

    loop {
        if eof && (in_flight.is_empty() || !controller.state().is_loading()) {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if !eof => {
                match line? {
                    Some(line) => match controller.submit(AnalysisInput::text(line)) {
                        Ok(pending) => {
                            if let Some(notice) = presenter.render_input_notice(pending.input()) {
                                writeln!(out, "{}", notice)?;
                            }
                            in_flight.push(pending.resolve());
                        }
                        Err(err) => writeln!(out, "{}", presenter.status_line(Status::Warn, err))?,
                    },
                    None => eof = true,
                }
            }
            Some(resolution) = in_flight.next(), if !in_flight.is_empty() => {
                match resolution {
                    Resolution::Applied(state) => debug!("Applied {} state", state.as_str()),
                    Resolution::Superseded => debug!("Discarded a superseded response"),
                    Resolution::Disposed => debug!("Discarded a response after disposal"),
                }
            }
            changed = observer.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = observer.borrow_and_update().clone();
                write_state(out, presenter, &state)?;
            }
        }
    }

    // The last outcome may land together with the final resolution.
    if observer.has_changed().unwrap_or(false) {
        let state = observer.borrow_and_update().clone();
        write_state(out, presenter, &state)?;
    }

    if !in_flight.is_empty() {
        debug!("Abandoning {} superseded request(s)", in_flight.len());
    }
    controller.dispose();
    Ok(())
}

fn write_state<W: Write>(
    out: &mut W,
    presenter: &Presenter,
    state: &SubmissionState,
) -> std::io::Result<()> {
    let rendered = presenter.render_state(state);
    if rendered.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", rendered)?;
    if !state.is_loading() {
        writeln!(out)?;
    }
    Ok(())
}
