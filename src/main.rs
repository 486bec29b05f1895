//! Pharma Inventory Agent - console entry point.
//!
//! Starts the interactive loop on stdin/stdout.

use std::sync::Arc;

use pharma_inventory::agent::{Agent, AgentConfig};
use pharma_inventory::inventory::Inventory;
use pharma_inventory::llm::OpenAiCompatClient;
use pharma_inventory::tools::ToolRegistry;
use pharma_inventory::{config::Config, repl};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays the console transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pharma_inventory=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.model);

    let inventory = Inventory::seeded();
    let llm = Arc::new(OpenAiCompatClient::new(
        config.api_key.clone(),
        config.base_url.clone(),
    ));
    let agent = Agent::new(
        AgentConfig::new(config.model.clone()).with_max_turns(config.max_turns),
        llm,
        ToolRegistry::inventory(inventory.clone()),
    );

    repl::run_loop(
        &agent,
        &inventory,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}
