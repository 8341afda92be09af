//! Submission input model.

use std::path::Path;

use crate::error::InvalidInputError;

/// One submission to the analysis service: an uploaded file or raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisInput {
    /// File upload, sent as the multipart `file` field.
    File { filename: String, payload: Vec<u8> },
    /// Raw text, sent as `{"text": ...}`.
    Text(String),
}

impl AnalysisInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn file(filename: impl Into<String>, payload: Vec<u8>) -> Self {
        Self::File {
            filename: filename.into(),
            payload,
        }
    }

    /// Read a file from disk into a file input named after the path's basename.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let payload = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::File { filename, payload })
    }

    /// Reject inputs that would submit nothing.
    ///
    /// Whitespace-only text counts as empty. A zero-byte file with a name is
    /// still a selected file and is accepted.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        match self {
            Self::Text(text) if text.trim().is_empty() => Err(InvalidInputError::EmptyText),
            Self::File { filename, .. } if filename.trim().is_empty() => {
                Err(InvalidInputError::NoFileSelected)
            }
            _ => Ok(()),
        }
    }

    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::File { filename, payload } => {
                format!("file {} ({} bytes)", filename, payload.len())
            }
            Self::Text(text) => format!("text ({} chars)", text.chars().count()),
        }
    }

    /// Character count of a text submission.
    pub fn character_count(&self) -> Option<usize> {
        match self {
            Self::Text(text) => Some(text.chars().count()),
            Self::File { .. } => None,
        }
    }
}
