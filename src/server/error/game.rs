//! User-facing game errors.
//!
//! These are the precondition, permission and total-failure conditions of the
//! game lifecycle. None of them are fatal: each is reported back to the member
//! who triggered the interaction and leaves the session as it was.

use serenity::all::Permissions;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The requester is not connected to any voice channel.
    #[error("You need to be in a voice channel first.")]
    NotInVoice,

    /// Fewer than two human members occupy the requester's voice channel.
    #[error("At least 2 people need to be in the voice channel (found {found}).")]
    NotEnoughPlayers {
        /// Number of eligible occupants found
        found: usize,
    },

    /// A game is already running in this guild.
    #[error("A game is already running in this server. Use /end-game first.")]
    SessionExists,

    /// No game is running in this guild.
    #[error("No active game. Use /start-game first.")]
    NoSession,

    /// The team channels for this game already exist.
    #[error("The team channels for this game have already been created.")]
    AlreadyActive,

    /// The bot lacks one or more permissions required for the operation.
    ///
    /// Carries only the missing permission bits.
    #[error("I'm missing the following permissions: {}", .0.get_permission_names().join(", "))]
    MissingPermissions(Permissions),

    /// A team voice channel could not be created.
    #[error("Failed to create the team voice channels. Check my permissions and try again.")]
    ChannelCreation,

    /// Neither the original voice channel nor a fallback lobby is available.
    #[error("Couldn't find or create a voice channel to move everyone back to.")]
    NoDestination,
}
