//! Ready event handler for bot initialization.
//!
//! This module handles the `ready` event which is fired when the bot successfully
//! connects to Discord's gateway and completes the initial handshake. The ready
//! handler is used to:
//! - Log connection information
//! - Advertise the start command in the bot's presence
//! - Register the slash commands

use serenity::all::{ActivityData, Command, Context, GuildId, Ready};

use crate::server::bot::commands::{self, START_GAME_COMMAND};

/// Handles the ready event when the bot connects to Discord.
///
/// Registers the slash commands in the configured guild, where they show up
/// immediately, or globally when no guild is configured. A registration
/// failure is logged; the bot keeps running so previously registered commands
/// still work.
///
/// # Arguments
/// - `ctx` - Discord context for setting activity status and registering commands
/// - `ready` - Ready event data containing bot user information
/// - `command_guild_id` - Guild to register commands in, if any
pub async fn handle_ready(ctx: Context, ready: Ready, command_guild_id: Option<GuildId>) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::playing(format!("/{}", START_GAME_COMMAND))));

    let result = match command_guild_id {
        Some(guild_id) => guild_id.set_commands(&ctx.http, commands::register()).await,
        None => Command::set_global_commands(&ctx.http, commands::register()).await,
    };

    match result {
        Ok(registered) => tracing::info!(
            "Registered {} slash commands ({})",
            registered.len(),
            command_guild_id.map_or("global".to_string(), |id| format!("guild {}", id))
        ),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }
}
