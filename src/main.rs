// src/main.rs

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;

use app::PrigorodApp;
use prigorod_config::{ConfigLoader, ConfigValidator};

#[tokio::main]
async fn main() -> Result<()> {
    // Nothing may log before the subscriber exists, so the loader stays
    // silent and the load is reported here once logging is up.
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ConfigLoader::load(config_path.as_deref())?;

    init_logging(&config.app.log_level);

    info!("Starting Prigorod skill v{}", env!("CARGO_PKG_VERSION"));
    info!(path = ?config_path, "configuration loaded");

    ConfigValidator::validate(&config)?;

    let app = PrigorodApp::new(config)?;
    app.run().await?;

    info!("Prigorod shut down successfully");
    Ok(())
}

fn init_logging(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
