//! Transport seam between the submission controller and the analysis service.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::models::{AnalysisInput, RawAnalysisResponse};

/// Sends one analysis request and returns the undecoded response body.
///
/// Implementations perform exactly one attempt. Non-success statuses are
/// reported as `TransportError::Status`; decoding the body is left to the
/// normalizer.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn analyze(&self, input: &AnalysisInput) -> Result<RawAnalysisResponse, TransportError>;
}
