use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use surveyor::config::{database, settings::Settings};
use surveyor::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env().context("failed to load configuration")?;
    let surveys = database::connect(&settings).context("failed to open survey database")?;
    let state = AppState::new(&settings, Arc::new(surveys)).context("failed to build LLM client")?;

    let listener = TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    info!(addr = %listener.local_addr()?, model = %settings.model, "survey generator listening");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
