mod app;
mod client;
mod poller;
mod views;

use std::time::Duration;

use clap::{Parser, Subcommand};
use wellbeing_config::init_tracing;

use crate::app::{run_page, Mode};
use crate::client::{DashboardClient, DashboardClientConfig, DashboardClientError};
use crate::views::access_impact::AccessImpactPage;
use crate::views::alerts::AlertsPage;
use crate::views::overview::OverviewPage;
use crate::views::productivity::ProductivityPage;
use crate::views::realtime::RealtimePage;
use crate::views::work_location::WorkLocationPage;

#[derive(Parser, Debug)]
#[command(
    name = "wellbeing-dashboard",
    version,
    about = "Terminal dashboard for the wellbeing analytics API"
)]
struct Cli {
    /// API base URL (overrides API_BASE_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Seconds between polls on live pages
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Fetch and render a single time, then exit
    #[arg(long)]
    once: bool,

    #[command(subcommand)]
    page: PageCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum PageCommand {
    /// Location distribution, stress share and flagged departments
    Overview,
    /// Live stress, productivity and location estimates
    Realtime,
    /// Department burnout alerts
    Alerts,
    /// Per-location stress, wellbeing and effectiveness
    WorkLocation,
    /// Comparison card for one location
    AccessImpact {
        /// Location to compare (server default: Remote)
        #[arg(long)]
        location: Option<String>,
    },
    /// Productivity change breakdown
    Productivity,
}

impl Cli {
    fn poll_mode(&self) -> Mode {
        if self.once {
            Mode::Once
        } else {
            Mode::Poll {
                interval: Duration::from_secs(self.interval),
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_tracing("warn");

    let cli = Cli::parse();

    let mut config = DashboardClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        config.base_url = url.clone();
    }
    let client = DashboardClient::new(config)?;
    tracing::info!(api = client.base_url(), page = ?cli.page, "starting dashboard");

    let polling = cli.poll_mode();

    match cli.page.clone() {
        PageCommand::Realtime => {
            run_page(
                RealtimePage::default(),
                move || {
                    let client = client.clone();
                    async move { client.fetch_stats().await }
                },
                polling,
            )
            .await;
        }
        PageCommand::Alerts => {
            run_page(
                AlertsPage::default(),
                move || {
                    let client = client.clone();
                    async move { client.fetch_alerts().await }
                },
                polling,
            )
            .await;
        }
        PageCommand::Overview => {
            run_page(
                OverviewPage::default(),
                move || {
                    let client = client.clone();
                    async move {
                        let (stats, alerts) =
                            tokio::try_join!(client.fetch_stats(), client.fetch_alerts())?;
                        Ok::<_, DashboardClientError>((stats, alerts))
                    }
                },
                polling,
            )
            .await;
        }
        PageCommand::Productivity => {
            run_page(
                ProductivityPage::default(),
                move || {
                    let client = client.clone();
                    async move { client.fetch_stats().await }
                },
                polling,
            )
            .await;
        }
        PageCommand::WorkLocation => {
            run_page(
                WorkLocationPage::default(),
                move || {
                    let client = client.clone();
                    async move { client.fetch_work_location_impact().await }
                },
                Mode::Once,
            )
            .await;
        }
        PageCommand::AccessImpact { location } => {
            let label = location.clone().unwrap_or_else(|| "Remote".to_string());
            run_page(
                AccessImpactPage::new(label),
                move || {
                    let client = client.clone();
                    let location = location.clone();
                    async move { client.fetch_access_impact(location.as_deref()).await }
                },
                Mode::Once,
            )
            .await;
        }
    }

    Ok(())
}
