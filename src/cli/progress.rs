//! Loading indicator shown while a submission is in flight.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner on stderr with a steady tick. Call `finish_and_clear` once the
/// submission leaves `Loading`.
pub fn loading_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
