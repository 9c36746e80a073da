use anyhow::Result;
use clap::Parser;
use labels_cli::commands;
use labels_cli::config::CliConfig;
use labels_client::{HttpTransport, LabelClient};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::parse();
    debug!("server: {}", config.url);

    let transport = HttpTransport::from_config(&config.http_config())?;
    let client = LabelClient::new(transport);

    let output = commands::run(&client, config.command).await?;
    println!("{output}");
    Ok(())
}
