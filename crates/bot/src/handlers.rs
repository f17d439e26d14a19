//! Gateway event handlers
//!
//! Reacts to `ready` and `message` notifications from the Discord client

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;

/// Reply sent to the configured owner
pub const OWNER_GREETING: &str = "bonjour !";

/// Event handler registered on the serenity client
#[derive(Debug, Clone)]
pub struct Handler {
    owner_tag: String,
}

impl Handler {
    pub const fn new(owner_tag: String) -> Self {
        Self { owner_tag }
    }
}

/// Decide what to answer to a message
///
/// Bot authors are ignored. Only the owner gets a reply.
pub fn reply_for(is_bot: bool, author_tag: &str, owner_tag: &str) -> Option<&'static str> {
    if is_bot || author_tag != owner_tag {
        return None;
    }

    Some(OWNER_GREETING)
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!(user = %ready.user.tag(), "discord bot ready");
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let author_tag = msg.author.tag();
        tracing::info!(author = %author_tag, channel = %msg.channel_id, "new message");

        if let Some(reply) = reply_for(msg.author.bot, &author_tag, &self.owner_tag) {
            if let Err(e) = msg.reply(&ctx, reply).await {
                tracing::error!("Failed to reply to {}: {}", author_tag, e);
            }
        }
    }
}
