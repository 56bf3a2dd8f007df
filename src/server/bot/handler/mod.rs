use serenity::all::{Context, EventHandler, GuildId, Interaction, Ready};
use serenity::async_trait;
use std::sync::Arc;

use crate::server::data::session::SessionStore;

pub mod interaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    /// Sessions of every guild the bot is playing in
    pub sessions: Arc<dyn SessionStore>,
    /// Guild to register slash commands in, global registration when `None`
    pub command_guild_id: Option<GuildId>,
}

impl Handler {
    pub fn new(sessions: Arc<dyn SessionStore>, command_guild_id: Option<GuildId>) -> Self {
        Self {
            sessions,
            command_guild_id,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready, self.command_guild_id).await;
    }

    /// Called for slash commands and button presses
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(self.sessions.as_ref(), ctx, interaction).await;
    }
}
