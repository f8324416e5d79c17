//! Courier CLI binary entry point.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use courier::cli::Cli;
use courier::config::CourierConfig;
use courier::news::{news_tool, NewsClient};
use courier::run::PollerConfig;
use courier::service::HttpAgentService;
use courier::session::{AssistantProfile, FileIdentityStore, IdentityStore, Session};
use courier::tools::ToolRegistry;

const INSTRUCTIONS: &str = "You are a helpful news analyst. When the user names a topic, \
call the get_news tool to fetch recent articles, then produce a concise summary of what \
they report. If the tool returns no articles, say that no news was found.";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("courier=info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CourierConfig::from_env();

    let mut registry = ToolRegistry::new();
    registry.register(news_tool(Arc::new(NewsClient::from_config(&config)?)));

    let store = FileIdentityStore::new_default();
    if cli.fresh {
        store.clear()?;
    }

    let mut session = Session::new(
        Arc::new(HttpAgentService::from_config(&config)?),
        Arc::new(registry),
        Arc::new(store),
        AssistantProfile {
            model: cli.model,
            name: "News Summarizer".to_string(),
            instructions: INSTRUCTIONS.to_string(),
        },
    );

    let poller_config = PollerConfig {
        interval: Duration::from_millis(cli.interval_ms),
        max_wall_clock: Some(Duration::from_secs(cli.timeout_secs)),
    };
    let cancel = CancellationToken::new();

    let summary = session
        .submit_topic_with(&cli.topic, poller_config, &cancel)
        .await?;
    println!("{summary}");
    Ok(())
}
