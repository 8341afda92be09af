//! docscope - command-line client for a document-analysis service.
//!
//! Uploads files or text, then shows the returned summary, named entities
//! grouped by category, and sentiment.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    let default_filter = if docscope::cli::is_verbose() {
        "docscope=info"
    } else {
        "docscope=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    docscope::cli::run().await
}
