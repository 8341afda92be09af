//! Service reachability check.

use crate::cli::render::{Presenter, Status};
use crate::config::Config;
use crate::http_client::AnalysisClient;

pub async fn cmd_status(config: &Config) -> anyhow::Result<()> {
    let presenter = Presenter::new(&config.display);
    let client = AnalysisClient::from_config(&config.service)?;

    println!("{}", presenter.heading("Analysis Service"));
    println!(
        "  {:<10} {}",
        "Endpoint:",
        presenter.highlight(client.base_url())
    );

    match client.service_info().await {
        Ok(info) => {
            println!(
                "  {:<10} {}",
                "Status:",
                presenter.status_line(Status::Success, "reachable")
            );
            if let Some(message) = info.message {
                println!("  {:<10} {}", "Message:", message);
            }
            Ok(())
        }
        Err(err) => {
            println!(
                "  {:<10} {}",
                "Status:",
                presenter.status_line(Status::Error, "unreachable")
            );
            println!("{}", presenter.detail_line(&err));
            std::process::exit(1);
        }
    }
}
