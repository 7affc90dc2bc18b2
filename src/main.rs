use clap::Parser;

use popchat::widget::ui::{launch_ui, WidgetLaunchConfig};
use popchat::PopchatError;

#[derive(Parser, Debug)]
#[command(name = "popchat")]
#[command(about = "Popchat desktop chat widget")]
struct Cli {
    /// Relay base URL (e.g. http://localhost:5000).
    #[arg(long, env = "POPCHAT_RELAY", default_value = popchat::config::DEFAULT_RELAY_URL)]
    relay: String,
}

fn main() -> popchat::Result<()> {
    popchat::logging::init_tracing("popchat");
    let cli = Cli::parse();

    launch_ui(WidgetLaunchConfig {
        relay_url: cli.relay,
    })
    .map_err(|err| PopchatError::Runtime(err.to_string()))
}
