//! JSON export of analysis results.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{AnalysisInput, AnalysisResult, EntityGroup};

/// Exported document: the canonical result plus grouping and provenance.
///
/// The flattened result keeps `summary`, `entities` and `sentiment` at the top
/// level, so an export reads back through the normalizer unchanged.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub exported_at: DateTime<Utc>,
    pub input: String,
    #[serde(flatten)]
    pub result: &'a AnalysisResult,
    pub entity_groups: Vec<EntityGroup>,
}

impl<'a> ExportDocument<'a> {
    pub fn new(input: &AnalysisInput, result: &'a AnalysisResult) -> Self {
        Self {
            exported_at: Utc::now(),
            input: input.describe(),
            result,
            entity_groups: result.entity_groups(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub async fn write(&self, path: &Path) -> anyhow::Result<()> {
        let json = self.to_json()?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
