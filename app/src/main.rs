//! Moneyhack gateway application
//!
//! Boots configuration and logging, then serves the UI-facing API on
//! loopback until terminated.

use anyhow::Context;

use moneyhack_api::AppState;
use moneyhack_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("moneyhack=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    tracing::info!("Starting moneyhack gateway");

    let config = AppConfig::from_env();
    let port = config.api_port;
    let state = AppState::with_config(config);

    moneyhack_api::start_server(state, port)
        .await
        .context("gateway server failed")?;

    Ok(())
}
