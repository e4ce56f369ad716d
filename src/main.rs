mod components;
mod config;
mod error;
mod startup;
mod utils;

use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting notikka");

    // Load configuration
    let config = startup::load_config()?;

    // Run one sync pass
    startup::run_sync(config).await
}
