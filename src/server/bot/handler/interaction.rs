//! Interaction handlers for the game commands and the "Create game" button.
//!
//! Every interaction is acknowledged with an ephemeral deferral before any work
//! starts, which keeps within Discord's three second acknowledgement window.
//! The outcome then replaces the deferred response, so results and errors are
//! only visible to the member who triggered them. The team announcement itself
//! is posted as a regular channel message by the game service.
//!
//! Errors never escape these handlers: game errors are shown to the member,
//! everything else is logged and answered with a generic message.

use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse, GuildId, Interaction,
};

use crate::server::{
    bot::commands::{END_GAME_COMMAND, START_GAME_COMMAND},
    data::session::SessionStore,
    error::AppError,
    model::game::{Session, StartGameParams},
    platform::{announcement::MATERIALIZE_BUTTON_ID, SerenityPlatform},
    service::game::GameService,
};

const GUILD_ONLY_MESSAGE: &str = "Games can only be played in a server.";

/// Routes an interaction to its handler.
///
/// # Arguments
/// - `sessions` - Session store shared by all interactions
/// - `ctx` - Discord context for API access
/// - `interaction` - The received interaction
pub async fn handle_interaction(
    sessions: &dyn SessionStore,
    ctx: Context,
    interaction: Interaction,
) {
    match interaction {
        Interaction::Command(command) => handle_command(sessions, &ctx, &command).await,
        Interaction::Component(component)
            if component.data.custom_id == MATERIALIZE_BUTTON_ID =>
        {
            handle_materialize(sessions, &ctx, &component).await
        }
        _ => {}
    }
}

/// Handles `/start-game` and `/end-game`.
async fn handle_command(sessions: &dyn SessionStore, ctx: &Context, command: &CommandInteraction) {
    let name = command.data.name.as_str();
    if name != START_GAME_COMMAND && name != END_GAME_COMMAND {
        tracing::warn!("Received unknown command /{}", name);
        return;
    }

    let Some(guild_id) = command.guild_id else {
        let reply = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(GUILD_ONLY_MESSAGE)
                .ephemeral(true),
        );
        if let Err(e) = command.create_response(&ctx.http, reply).await {
            tracing::error!("Failed to reply to /{}: {}", name, e);
        }
        return;
    };

    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        tracing::error!("Failed to acknowledge /{} in guild {}: {}", name, guild_id, e);
        return;
    }

    let platform = SerenityPlatform::from_context(ctx);
    let service = GameService::new(&platform, sessions);

    let result = if name == START_GAME_COMMAND {
        service
            .start(StartGameParams {
                guild_id,
                requester: command.user.id,
                channel_id: command.channel_id,
            })
            .await
            .map(|session| start_summary(&session))
    } else {
        service.end(guild_id).await.map(|report| report.summary())
    };

    let content = reply_content(guild_id, name, result);
    if let Err(e) = command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await
    {
        tracing::error!("Failed to respond to /{} in guild {}: {}", name, guild_id, e);
    }
}

/// Handles the "Create game" button on a team announcement.
async fn handle_materialize(
    sessions: &dyn SessionStore,
    ctx: &Context,
    component: &ComponentInteraction,
) {
    let Some(guild_id) = component.guild_id else {
        tracing::warn!("Received {} outside of a guild", MATERIALIZE_BUTTON_ID);
        return;
    };

    if let Err(e) = component.defer_ephemeral(&ctx.http).await {
        tracing::error!(
            "Failed to acknowledge {} in guild {}: {}",
            MATERIALIZE_BUTTON_ID,
            guild_id,
            e
        );
        return;
    }

    let platform = SerenityPlatform::from_context(ctx);
    let result = GameService::new(&platform, sessions)
        .materialize(guild_id)
        .await
        .map(|report| report.summary());

    let content = reply_content(guild_id, MATERIALIZE_BUTTON_ID, result);
    if let Err(e) = component
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await
    {
        tracing::error!(
            "Failed to respond to {} in guild {}: {}",
            MATERIALIZE_BUTTON_ID,
            guild_id,
            e
        );
    }
}

/// Turns the outcome of a transition into the reply shown to the requester.
///
/// Errors are logged by `AppError::user_message` inside a span naming the
/// action and guild.
fn reply_content(guild_id: GuildId, action: &str, result: Result<String, AppError>) -> String {
    let _span = tracing::info_span!("interaction", action, guild_id = %guild_id).entered();

    match result {
        Ok(summary) => summary,
        Err(e) => e.user_message(),
    }
}

fn start_summary(session: &Session) -> String {
    format!(
        "Teams drafted from **{}**: {} vs {}. Press **Create game** on the announcement to move everyone.",
        session.original_channel.name,
        session.team_a.len(),
        session.team_b.len()
    )
}
