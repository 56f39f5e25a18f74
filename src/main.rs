use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use touchline::app::AppContext;
use touchline::cli::{commands, Cli, Commands};
use touchline::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Serve => commands::serve(ctx).await?,
        Commands::Sync => commands::sync_once(&ctx).await?,
        Commands::List => commands::list_articles(&ctx).await?,
    }

    Ok(())
}
