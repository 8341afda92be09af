//! Analysis result models.

use serde::{Deserialize, Serialize};

use super::sentiment::SentimentResult;
use crate::services::entities;

/// A (text span, category) pair extracted by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub category: String,
}

impl Entity {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

/// Entities sharing a category, in original order. Derived for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityGroup {
    pub category: String,
    pub members: Vec<String>,
}

/// Canonical result of one analysis.
///
/// Never mutated after construction; a new submission yields a new value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    summary: String,
    entities: Vec<Entity>,
    sentiment: SentimentResult,
}

impl AnalysisResult {
    pub fn new(summary: String, entities: Vec<Entity>, sentiment: SentimentResult) -> Self {
        Self {
            summary,
            entities,
            sentiment,
        }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn sentiment(&self) -> &SentimentResult {
        &self.sentiment
    }

    /// Entities grouped by category, recomputed on every call.
    pub fn entity_groups(&self) -> Vec<EntityGroup> {
        entities::group(&self.entities)
    }
}

/// Undecoded response body from the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawAnalysisResponse {
    body: Vec<u8>,
}

impl RawAnalysisResponse {
    pub fn from_bytes(body: Vec<u8>) -> Self {
        Self { body }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.body
    }
}

impl From<serde_json::Value> for RawAnalysisResponse {
    fn from(value: serde_json::Value) -> Self {
        Self {
            body: value.to_string().into_bytes(),
        }
    }
}
