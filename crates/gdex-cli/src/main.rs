mod output;
mod run;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gdex")]
#[command(about = "Disaster data extraction and enrichment pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the event catalog, enrich every event, and write the dataset.
    Run {
        /// ISO3 country filter for the event catalog.
        #[arg(long)]
        country: Option<String>,
        /// Event-identifier type prefix, e.g. FL for floods.
        #[arg(long = "type", default_value = "FL")]
        event_type: String,
        /// Process at most this many events.
        #[arg(long)]
        max_events: Option<usize>,
        /// Prefix for the output files.
        #[arg(long, default_value = "gdex_dataset")]
        output_prefix: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = gdex_core::load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            country,
            event_type,
            max_events,
            output_prefix,
        } => {
            run::run(&config, country.as_deref(), &event_type, max_events, &output_prefix).await
        }
    }
}
