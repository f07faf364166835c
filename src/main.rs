use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use preorder_core::{
    AppState,
    catalog::Catalog,
    cli::{self, Cli, Commands},
    config::Config,
    create_app,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Cli::parse();

    match args.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(Config::from_env()?).await,
        Commands::Config => cli::handle_config_validate(&Config::from_env()?),
        Commands::Menu => {
            cli::handle_menu(&Catalog::standard());
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    config.validate()?;

    let port = config.server_port;
    let state = AppState::new(config, Catalog::standard());
    tracing::info!(
        dishes = state.catalog.dishes().len(),
        "menu catalog loaded"
    );

    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
