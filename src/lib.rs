//! docscope - client for a remote document-analysis service.
//!
//! Submits a file or raw text to the analysis service, normalizes whichever
//! response schema the service emits, and exposes the result for display.

// Model types use `from_str` methods that return Option<Self>,
// not Result<Self, Error> as std::str::FromStr requires.
#![allow(clippy::should_implement_trait)]

pub mod cli;
pub mod config;
pub mod error;
pub mod http_client;
pub mod models;
pub mod services;

pub use error::{AnalysisError, InvalidInputError, NormalizationError, TransportError};
pub use models::{AnalysisInput, AnalysisResult, Entity, EntityGroup, SentimentResult};
pub use services::submission::{SubmissionController, SubmissionState};
