//! Result orchestration: normalization, entity grouping, and submission lifecycle.

pub mod entities;
pub mod normalize;
pub mod submission;

pub use entities::group;
pub use normalize::normalize;
pub use submission::{PendingSubmission, Resolution, SubmissionController, SubmissionState};
