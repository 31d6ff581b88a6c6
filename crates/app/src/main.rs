//! Pitchside client - Main Entry Point
//!
//! Initializes logging, reads configuration from the environment and
//! builds the shared application context.

mod context;

use context::{AppContext, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let ctx = AppContext::new(&config)?;

    let restored = ctx.restore_session().await?;
    tracing::info!(
        api_url = %config.api_url,
        data_dir = %config.data_dir.display(),
        session_restored = restored,
        "pitchside client ready"
    );

    Ok(())
}
