//! Game session lifecycle.
//!
//! This module provides the `GameService`, the controller for the per-guild game
//! state machine:
//!
//! - `start` - Idle → Drafted: split the requester's voice channel into teams
//!   and announce them
//! - `materialize` - Drafted → Active: create the team voice channels and move
//!   each team into its channel
//! - `end` - Drafted/Active → Idle: move everyone back, remove the empty team
//!   channels and close the announcement
//!
//! Every transition re-reads the session from the store when it starts, so two
//! interactions racing on the same guild never act on a stale copy. Precondition
//! and permission failures are returned as `GameError`s and leave the session
//! untouched. Per-member move failures never abort a transition; they are
//! collected into `BatchReport`s.

pub mod end;
pub mod materialize;
pub mod start;

#[cfg(test)]
mod test;

use serenity::all::{ChannelId, GuildId, Permissions, UserId};

use crate::server::{
    data::session::SessionStore,
    error::{game::GameError, AppError},
    model::game::{BatchReport, Session},
    platform::VoicePlatform,
};

/// Permissions needed in the guild to create team channels and move members.
pub const MATERIALIZE_PERMISSIONS: Permissions = Permissions::MANAGE_CHANNELS
    .union(Permissions::MOVE_MEMBERS)
    .union(Permissions::VIEW_CHANNEL)
    .union(Permissions::CONNECT);

/// Permissions needed in the destination channel to move members back.
pub const RETURN_PERMISSIONS: Permissions = Permissions::VIEW_CHANNEL
    .union(Permissions::CONNECT)
    .union(Permissions::MOVE_MEMBERS);

/// Controller for the game session lifecycle.
///
/// Holds references to the chat platform adapter and the session store. A
/// service is cheap to construct and is created per interaction.
pub struct GameService<'a, P: VoicePlatform + ?Sized> {
    /// Chat platform the game is played on
    platform: &'a P,
    /// Storage for in-progress sessions
    sessions: &'a dyn SessionStore,
}

impl<'a, P: VoicePlatform + ?Sized> GameService<'a, P> {
    /// Creates a new GameService instance.
    ///
    /// # Arguments
    /// - `platform` - Chat platform adapter
    /// - `sessions` - Session store shared by all interactions
    ///
    /// # Returns
    /// - `GameService` - New service instance
    pub fn new(platform: &'a P, sessions: &'a dyn SessionStore) -> Self {
        Self { platform, sessions }
    }

    /// Loads the guild's current session.
    ///
    /// # Returns
    /// - `Ok(Session)` - The session as currently stored
    /// - `Err(GameError::NoSession)` - The guild is idle
    async fn load_session(&self, guild_id: GuildId) -> Result<Session, AppError> {
        self.sessions
            .get(guild_id)
            .await?
            .ok_or_else(|| GameError::NoSession.into())
    }

    /// Verifies the bot holds all `required` permissions.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to check
    /// - `channel_id` - Channel to check in, or `None` for guild-wide permissions
    /// - `required` - Permissions that must all be granted
    ///
    /// # Returns
    /// - `Ok(())` - All permissions granted
    /// - `Err(GameError::MissingPermissions)` - Carries the missing subset
    async fn require_permissions(
        &self,
        guild_id: GuildId,
        channel_id: Option<ChannelId>,
        required: Permissions,
    ) -> Result<(), AppError> {
        let granted = self.platform.bot_permissions(guild_id, channel_id).await?;
        let missing = required.difference(granted);

        if !missing.is_empty() {
            tracing::info!(
                "Missing permissions {:?} in guild {} (channel {:?})",
                missing,
                guild_id,
                channel_id
            );
            return Err(GameError::MissingPermissions(missing).into());
        }

        Ok(())
    }

    /// Deletes channels this service created for an operation that was aborted.
    ///
    /// Failures are logged; the channels are already untracked.
    async fn discard_channels(&self, channels: &[ChannelId], reason: &str) {
        for &channel_id in channels {
            if let Err(e) = self.platform.delete_channel(channel_id, reason).await {
                tracing::warn!("Failed to delete orphaned channel {}: {}", channel_id, e);
            }
        }
    }
}

/// Moves members one by one, tolerating individual failures.
///
/// A member who left voice, lacks access to the destination or cannot be moved
/// for any other reason is recorded in `failed` and the batch continues.
///
/// # Arguments
/// - `platform` - Chat platform adapter
/// - `guild_id` - Guild the members belong to
/// - `members` - Members to move, in order
/// - `destination` - Target voice channel, or `None` to disconnect
///
/// # Returns
/// - `BatchReport` - Members that were and were not moved
pub async fn move_members<P: VoicePlatform + ?Sized>(
    platform: &P,
    guild_id: GuildId,
    members: &[UserId],
    destination: Option<ChannelId>,
) -> BatchReport {
    let mut report = BatchReport::default();

    for &user_id in members {
        match platform.move_member(guild_id, user_id, destination).await {
            Ok(()) => report.succeeded.push(user_id),
            Err(e) => {
                tracing::debug!(
                    "Failed to move member {} to {:?} in guild {}: {}",
                    user_id,
                    destination,
                    guild_id,
                    e
                );
                report.failed.push(user_id);
            }
        }
    }

    report
}
