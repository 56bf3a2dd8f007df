//! Slash command definitions.

use serenity::all::CreateCommand;

pub const START_GAME_COMMAND: &str = "start-game";
pub const END_GAME_COMMAND: &str = "end-game";

/// Builds every slash command the bot handles.
///
/// Both commands are guild-only since games are scoped to a server's voice
/// channels.
pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(START_GAME_COMMAND)
            .description("Split everyone in your voice channel into two random teams.")
            .dm_permission(false),
        CreateCommand::new(END_GAME_COMMAND)
            .description("End the game and move everyone back.")
            .dm_permission(false),
    ]
}
