//! Bot configuration
//!
//! Reads the `discord` section of the application configuration

use anyhow::{Context, Result};
use immobot_core::ConfigStore;

/// Bot configuration
#[derive(Clone)]
pub struct BotConfig {
    /// Discord bot token
    pub token: String,

    /// Tag of the user the bot answers to (`name#discriminator` or `name`)
    pub owner_tag: String,
}

impl BotConfig {
    /// Read bot settings from the loaded configuration
    pub fn from_store(store: &ConfigStore) -> Result<Self> {
        let discord = store
            .get_sub("discord")
            .context("discord configuration section is missing")?;

        let token: String = discord
            .get_as("token")
            .context("discord.token must be a string")?;
        let owner_tag: String = discord
            .get_as("user_id")
            .context("discord.user_id must be a string")?;

        if token.is_empty() {
            anyhow::bail!("discord.token is empty");
        }

        Ok(Self { token, owner_tag })
    }
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("owner_tag", &self.owner_tag)
            .finish()
    }
}
