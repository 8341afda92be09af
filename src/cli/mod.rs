//! Command-line interface for docscope.

mod commands;
pub mod export;
pub mod progress;
pub mod render;

pub use commands::{is_verbose, run};
