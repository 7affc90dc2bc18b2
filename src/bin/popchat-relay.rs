use clap::Parser;

use popchat::config::RelayConfig;
use popchat::error::Result;
use popchat::relay;

#[derive(Parser, Debug)]
#[command(name = "popchat-relay")]
#[command(about = "Popchat relay: forwards widget messages to the completion API")]
struct Cli {
    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,

    /// Provider model id, e.g. mistralai/mistral-7b-instruct.
    #[arg(long)]
    model: Option<String>,

    /// OpenAI-compatible API base, e.g. https://openrouter.ai/api/v1.
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    popchat::logging::init_tracing("popchat-relay");
    let cli = Cli::parse();

    let mut config = RelayConfig::from_env()?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if cli.model.is_some() {
        config.openai.model = cli.model;
    }
    if cli.base_url.is_some() {
        config.openai.base_url = cli.base_url;
    }

    relay::run_with_shutdown(config, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown requested");
        }
    })
    .await
}
