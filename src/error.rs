//! Error types for submission, transport, normalization, and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// A submission rejected before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("no text to analyze")]
    EmptyText,
    #[error("no file selected")]
    NoFileSelected,
}

/// The request never produced a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to build request: {0}")]
    Request(String),
}

/// The service responded, but the body could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("response is not a JSON object")]
    NotAnObject,
    #[error("missing summary")]
    MissingSummary,
    #[error("unrecognized sentiment schema")]
    UnrecognizedSentiment,
}

/// Terminal failure of a single submission, as carried by `SubmissionState::Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Normalization(#[from] NormalizationError),
}

impl AnalysisError {
    /// Notice shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            AnalysisError::Transport(_) => "Error processing request.",
            AnalysisError::Normalization(_) => {
                "The analysis service responded, but its response could not be interpreted."
            }
        }
    }
}

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {format} config: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
    #[error("Failed to serialize {format} config: {message}")]
    Serialize {
        format: &'static str,
        message: String,
    },
}
