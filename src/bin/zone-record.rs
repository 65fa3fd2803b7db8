//! One-off tool: repoint a DNS record and refresh its zone.

use clap::Parser;
use pizzaapp::zone::ZoneClient;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "zone-record", about = "Modify a domain record via the OVH API")]
struct Cli {
    /// Zone name
    #[arg(short, long)]
    zone: String,
    /// Subdomain to modify
    #[arg(short, long)]
    subdomain: String,
    /// Record type to be modified
    #[arg(short, long)]
    record: String,
    /// Target to be set
    #[arg(short, long)]
    target: String,
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let client = ZoneClient::from_env().await?;
    let record_id = client
        .find_record_id(&cli.zone, &cli.record, &cli.subdomain)
        .await?;
    tracing::debug!(record_id, "record resolved");

    client
        .update_record_target(&cli.zone, record_id, &cli.subdomain, &cli.target)
        .await?;
    tracing::info!(zone = %cli.zone, subdomain = %cli.subdomain, "domain altered");

    client.refresh_zone(&cli.zone).await?;
    tracing::info!(zone = %cli.zone, "zone refreshed");
    Ok(())
}
