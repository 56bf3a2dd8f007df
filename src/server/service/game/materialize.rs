//! Creating the team channels: Drafted → Active.

use serenity::all::{ChannelId, GuildId};

use crate::server::{
    error::{game::GameError, AppError},
    model::game::{GameState, MaterializeReport, Session, Team},
    platform::VoicePlatform,
};

use super::{move_members, GameService, MATERIALIZE_PERMISSIONS};

impl<'a, P: VoicePlatform + ?Sized> GameService<'a, P> {
    /// Creates a voice channel per team and moves each team into its channel.
    ///
    /// Channels are created in the original channel's category. Each channel id
    /// is stored as soon as the channel exists, so a failure creating the second
    /// channel leaves the game drafted with the first channel recorded, and a
    /// retry reuses it instead of creating a duplicate. Moving members is best
    /// effort: members who left voice or cannot be moved are reported, not fatal.
    ///
    /// # Arguments
    /// - `guild_id` - Guild whose drafted game should be created
    ///
    /// # Returns
    /// - `Ok(MaterializeReport)` - Channels created, with per-team move results
    /// - `Err(GameError::NoSession)` - No game in this guild (or it ended meanwhile)
    /// - `Err(GameError::AlreadyActive)` - Team channels already exist
    /// - `Err(GameError::MissingPermissions)` - Bot cannot manage channels or move members
    /// - `Err(GameError::ChannelCreation)` - A team channel could not be created
    /// - `Err(AppError)` - Platform or store failure
    pub async fn materialize(&self, guild_id: GuildId) -> Result<MaterializeReport, AppError> {
        let mut session = self.load_session(guild_id).await?;

        if session.state() == GameState::Active {
            return Err(GameError::AlreadyActive.into());
        }

        self.require_permissions(guild_id, None, MATERIALIZE_PERMISSIONS)
            .await?;

        let parent_id = match self
            .platform
            .voice_channel(guild_id, session.original_channel.id)
            .await?
        {
            Some(channel) => channel.parent_id,
            None => session.original_channel.parent_id,
        };

        let mut created = Vec::new();
        for team in Team::ALL {
            if let Some(existing) = session.channel(team) {
                if self
                    .platform
                    .voice_channel(guild_id, existing)
                    .await?
                    .is_some()
                {
                    continue;
                }
            }

            let channel_id = match self
                .platform
                .create_voice_channel(
                    guild_id,
                    team.channel_name(),
                    parent_id,
                    &format!("Create game ({})", team.channel_name()),
                )
                .await
            {
                Ok(channel_id) => channel_id,
                Err(e) => {
                    tracing::error!(
                        "Failed to create {} channel in guild {}: {}",
                        team.channel_name(),
                        guild_id,
                        e
                    );
                    return Err(GameError::ChannelCreation.into());
                }
            };

            created.push(channel_id);
            session.set_channel(team, channel_id);

            if !self.sessions.update(session.clone()).await? {
                tracing::warn!(
                    "Game in guild {} ended while its channels were being created",
                    guild_id
                );
                self.discard_channels(&created, "Game ended before it was created")
                    .await;
                return Err(GameError::NoSession.into());
            }
        }

        let (channel_a, channel_b) = team_channels(&session)?;

        let team_a = move_members(
            self.platform,
            guild_id,
            session.roster(Team::A),
            Some(channel_a),
        )
        .await;
        let team_b = move_members(
            self.platform,
            guild_id,
            session.roster(Team::B),
            Some(channel_b),
        )
        .await;

        tracing::info!(
            "Created game in guild {}: moved {}/{} to {} and {}/{} to {}",
            guild_id,
            team_a.succeeded.len(),
            session.team_a.len(),
            channel_a,
            team_b.succeeded.len(),
            session.team_b.len(),
            channel_b
        );

        Ok(MaterializeReport {
            channel_a,
            channel_b,
            team_a,
            team_b,
        })
    }
}

fn team_channels(session: &Session) -> Result<(ChannelId, ChannelId), AppError> {
    match (session.channel_a, session.channel_b) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(AppError::InternalError(format!(
            "Team channels missing after creation in guild {}",
            session.guild_id
        ))),
    }
}
