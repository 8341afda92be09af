//! Data models for docscope.

mod input;
mod result;
mod sentiment;

pub use input::AnalysisInput;
pub use result::{AnalysisResult, Entity, EntityGroup, RawAnalysisResponse};
pub use sentiment::{SentimentLabel, SentimentResult};
