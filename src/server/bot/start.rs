use serenity::all::{Client, GatewayIntents};
use std::sync::Arc;

use crate::server::bot::handler::Handler;
use crate::server::config::Config;
use crate::server::data::session::SessionStore;
use crate::server::error::AppError;

/// Builds the Discord client without connecting it.
///
/// # Arguments
/// - `config` - Application configuration
/// - `sessions` - Session store shared by all interactions
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError)` - Client construction failed (e.g. malformed token)
pub async fn init_bot(
    config: &Config,
    sessions: Arc<dyn SessionStore>,
) -> Result<Client, AppError> {
    // Configure gateway intents - what events the bot will receive
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_VOICE_STATES
        | GatewayIntents::GUILD_MEMBERS;

    let handler = Handler::new(sessions, config.discord_guild_id);

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Starts the Discord bot in a blocking manner
///
/// This function connects the client to the gateway. It should be called from
/// within a tokio::spawn task since it will block until the bot shuts down.
///
/// # Arguments
/// - `client` - Client built by `init_bot`
///
/// # Returns
/// - `Ok(())` if the bot ran and shut down cleanly
/// - `Err(AppError)` if the gateway connection fails
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
