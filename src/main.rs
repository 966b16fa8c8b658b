use anyhow::Result;
use clap::Parser;
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use freeboard::cli::{self, Cli, Command};
use freeboard::client::PfdsClient;
use freeboard::service::StormEvents;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "freeboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.fetcher_config();

    match cli.command {
        Command::Lookup(args) => {
            let report = cli::lookup(&args, config).await?;
            print!("{report}");
        }
        Command::Serve => {
            tracing::info!("Starting MCP storm event server");

            let service = StormEvents::new(PfdsClient::new(config)?);
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;

            tracing::info!("Server shutdown complete");
        }
    }

    Ok(())
}
