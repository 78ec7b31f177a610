use anyhow::Result;
use clap::{Parser, Subcommand};
use rowboat_crypto::config::Config;
use rowboat_crypto::explorer::ExplorerClient;
use rowboat_crypto::query::commands::{cmd_analyze, cmd_graph, cmd_journal, cmd_watch};
use rowboat_crypto::query::formatters::OutputFormat;
use rowboat_crypto::Dashboard;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rowboat")]
#[command(about = "Wallet transaction history and knowledge graph explorer", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "table")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and show the latest transactions of an address
    Analyze { address: String },
    /// Read addresses from stdin, one search per line
    Watch,
    /// Show the sample knowledge graph
    Graph,
    /// Show the sample trading journal
    Journal,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from(cli.format.as_str());

    match cli.command {
        Commands::Graph => cmd_graph(&format),
        Commands::Journal => cmd_journal(&format),
        Commands::Analyze { address } => {
            let dashboard = build_dashboard()?;
            cmd_analyze(&dashboard, &address, &format).await
        }
        Commands::Watch => {
            let dashboard = build_dashboard()?;
            cmd_watch(&dashboard, &format).await
        }
    }
}

fn build_dashboard() -> Result<Dashboard<ExplorerClient>> {
    let config = Config::from_env()?;
    let client = ExplorerClient::new(config.explorer_api_url, config.request_timeout);
    info!("Explorer endpoint: {}", client.api_url());

    Ok(Dashboard::new(client, config.explorer_tx_url))
}
