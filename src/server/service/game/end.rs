//! Ending a game: Drafted/Active → Idle.

use serenity::all::{ChannelId, GuildId, UserId};

use crate::server::{
    error::{game::GameError, AppError},
    model::game::{AnnouncementStatus, EndReport, Session, TeamTeardown, LOBBY_CHANNEL_NAME},
    platform::VoicePlatform,
};

use super::{move_members, GameService, RETURN_PERMISSIONS};

impl<'a, P: VoicePlatform + ?Sized> GameService<'a, P> {
    /// Moves everyone back, cleans up the team channels and closes the game.
    ///
    /// Members return to the original voice channel, or to a newly created
    /// "Lobby" in the same category if the original has been deleted. A team
    /// channel is only deleted once it is empty; members who could not be moved
    /// keep their channel. The announcement loses its button and is marked as
    /// ended, a failure to edit it is only logged.
    ///
    /// Nothing is changed when no destination can be resolved or the bot lacks
    /// permissions in it, so the game can still be ended later. A lobby created
    /// for such an attempt is deleted again.
    ///
    /// # Arguments
    /// - `guild_id` - Guild whose game should end
    ///
    /// # Returns
    /// - `Ok(EndReport)` - Game ended, with per-team cleanup results
    /// - `Err(GameError::NoSession)` - No game in this guild
    /// - `Err(GameError::NoDestination)` - Original channel gone and no lobby could be created
    /// - `Err(GameError::MissingPermissions)` - Bot cannot move members into the destination
    /// - `Err(AppError)` - Platform or store failure
    pub async fn end(&self, guild_id: GuildId) -> Result<EndReport, AppError> {
        let session = self.load_session(guild_id).await?;

        let (destination, lobby_created) = self.resolve_destination(&session).await?;

        if let Err(e) = self
            .require_permissions(guild_id, Some(destination), RETURN_PERMISSIONS)
            .await
        {
            // Nobody has been moved yet, so an unusable lobby can go again
            if lobby_created {
                self.discard_channels(&[destination], "End game aborted")
                    .await;
            }
            return Err(e);
        }

        let team_a = self
            .clear_team_channel(guild_id, session.channel_a, destination)
            .await?;
        let team_b = self
            .clear_team_channel(guild_id, session.channel_b, destination)
            .await?;

        if let Some(message) = &session.announcement {
            if let Err(e) = self
                .platform
                .edit_announcement(message, &session.render_announcement(AnnouncementStatus::Ended))
                .await
            {
                tracing::warn!(
                    "Failed to update announcement {} in channel {}: {}",
                    message.message_id,
                    message.channel_id,
                    e
                );
            }
        }

        self.sessions.remove(guild_id).await?;

        tracing::info!(
            "Ended game in guild {}: {} + {} moved back, {} + {} remaining",
            guild_id,
            team_a.moves.succeeded.len(),
            team_b.moves.succeeded.len(),
            team_a.remaining,
            team_b.remaining
        );

        Ok(EndReport {
            destination,
            lobby_created,
            team_a,
            team_b,
        })
    }

    /// Finds the channel members return to.
    ///
    /// # Returns
    /// - `Ok((channel, false))` - The original voice channel still exists
    /// - `Ok((channel, true))` - A fallback lobby was created
    /// - `Err(GameError::NoDestination)` - The lobby could not be created
    async fn resolve_destination(&self, session: &Session) -> Result<(ChannelId, bool), AppError> {
        let original = &session.original_channel;

        if let Some(channel) = self
            .platform
            .voice_channel(session.guild_id, original.id)
            .await?
        {
            return Ok((channel.id, false));
        }

        match self
            .platform
            .create_voice_channel(
                session.guild_id,
                LOBBY_CHANNEL_NAME,
                original.parent_id,
                "End game (original channel missing)",
            )
            .await
        {
            Ok(channel_id) => {
                tracing::info!(
                    "Original channel {} is gone, created lobby {} in guild {}",
                    original.id,
                    channel_id,
                    session.guild_id
                );
                Ok((channel_id, true))
            }
            Err(e) => {
                tracing::error!(
                    "Failed to create lobby in guild {}: {}",
                    session.guild_id,
                    e
                );
                Err(GameError::NoDestination.into())
            }
        }
    }

    /// Empties a team channel into the destination and deletes it if nobody is
    /// left behind.
    async fn clear_team_channel(
        &self,
        guild_id: GuildId,
        channel_id: Option<ChannelId>,
        destination: ChannelId,
    ) -> Result<TeamTeardown, AppError> {
        let already_gone = TeamTeardown {
            removed: true,
            ..Default::default()
        };

        let Some(channel_id) = channel_id else {
            return Ok(already_gone);
        };
        if self
            .platform
            .voice_channel(guild_id, channel_id)
            .await?
            .is_none()
        {
            return Ok(already_gone);
        }

        let present: Vec<UserId> = self
            .platform
            .voice_members(guild_id, channel_id)
            .await?
            .into_iter()
            .map(|member| member.user_id)
            .collect();

        let moves = move_members(self.platform, guild_id, &present, Some(destination)).await;

        // Members whose move succeeded are gone even if the platform has not
        // caught up with their new voice state yet.
        let remaining = self
            .platform
            .voice_members(guild_id, channel_id)
            .await?
            .into_iter()
            .filter(|member| !moves.succeeded.contains(&member.user_id))
            .count();

        let removed = if remaining > 0 {
            tracing::warn!(
                "Keeping channel {} in guild {}: {} member(s) could not be moved",
                channel_id,
                guild_id,
                remaining
            );
            false
        } else {
            match self.platform.delete_channel(channel_id, "End game").await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(
                        "Failed to delete channel {} in guild {}: {}",
                        channel_id,
                        guild_id,
                        e
                    );
                    false
                }
            }
        };

        Ok(TeamTeardown {
            moves,
            remaining,
            removed,
        })
    }
}
