//! Immobot - Discord bot entry point

use anyhow::{Context, Result};
use bot::BotConfig;
use immobot_shared::{LogSettings, init_env, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    init_env();

    // Load configuration before tracing so the log section can drive it
    let config = immobot_core::config::load_from_env().context("Failed to load configuration")?;

    // The guard must be kept alive for the duration of the program to ensure logs are flushed
    let log_settings = LogSettings::from_store(&config)?;
    let _guard = init_tracing("bot", &log_settings);

    let app_env: String = config.get_as("env")?;
    tracing::info!(env = %app_env, "🚀 Starting Immobot");

    let bot_config = BotConfig::from_store(&config)?;
    tracing::info!("✓ Configuration loaded");

    bot::run_bot(bot_config).await
}
