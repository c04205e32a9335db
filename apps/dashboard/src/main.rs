use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dashboard::api::ApiClient;
use dashboard::cli::{self, Cli, Context};
use dashboard::config::Config;
use dashboard::http::{CredentialStore, HttpDispatcher};
use dashboard::state::AppState;
use dashboard::storage::{Storage, SESSION_TOKEN_KEY};
use dashboard::theme::ThemePreference;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting JobAgent dashboard v{}", env!("CARGO_PKG_VERSION"));

    let storage = Storage::open(&config.storage_path)?;
    debug!("Theme preference: {}", ThemePreference::load(&storage));

    // Restore the token captured by a previous `login`
    let credentials =
        CredentialStore::with_token(storage.get(SESSION_TOKEN_KEY).map(str::to_string));
    let dispatcher = HttpDispatcher::new(config.api_url.clone(), credentials.clone())?;
    info!("API endpoint: {}", dispatcher.base_url());

    let state = AppState::new(ApiClient::new(Arc::new(dispatcher), credentials));
    let mut ctx = Context { state, storage };

    cli::run(args.command, &mut ctx).await
}
