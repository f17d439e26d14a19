//! Immobot Bot - Discord bot for the owner's notifications
//!
//! This crate wraps the serenity client with the bot's event handler.

pub mod config;
pub mod handlers;

pub use config::BotConfig;

use anyhow::{Context, Result};
use handlers::Handler;
use serenity::prelude::*;
use tokio::signal;

/// Gateway intents the bot needs to see and read messages
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// Run the Discord bot
///
/// Connects to the gateway and runs until the client exits or a shutdown
/// signal (Ctrl+C / SIGTERM) is received.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    let handler = Handler::new(config.owner_tag);

    let mut client = Client::builder(&config.token, intents())
        .event_handler(handler)
        .await
        .context("Failed to build Discord client")?;
    tracing::info!("Bot initialized, connecting to gateway");

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        wait_for_shutdown().await;
        tracing::info!("📡 Shutdown signal received");
        shard_manager.shutdown_all().await;
    });

    client
        .start()
        .await
        .context("Discord client exited with an error")?;

    tracing::info!("✓ Bot stopped");
    Ok(())
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intents_include_message_content() {
        let intents = intents();
        assert!(intents.contains(GatewayIntents::MESSAGE_CONTENT));
        assert!(intents.contains(GatewayIntents::GUILD_MESSAGES));
        assert!(intents.contains(GatewayIntents::DIRECT_MESSAGES));
    }
}
