//! Starting a game: Idle → Drafted.

use serenity::all::UserId;

use crate::server::{
    error::{game::GameError, AppError},
    model::game::{AnnouncementStatus, Session, StartGameParams},
    platform::VoicePlatform,
    service::shuffle::split_teams,
};

use super::GameService;

impl<'a, P: VoicePlatform + ?Sized> GameService<'a, P> {
    /// Drafts two random teams from the requester's voice channel.
    ///
    /// Collects the human occupants of the voice channel the requester is in,
    /// splits them into two teams, stores the drafted session and posts the team
    /// announcement with its "Create game" button to the channel the command was
    /// used in. If the announcement cannot be posted the session is discarded
    /// again so the guild stays idle.
    ///
    /// # Arguments
    /// - `params` - Guild, requester and invoking channel
    ///
    /// # Returns
    /// - `Ok(Session)` - The drafted session, including its announcement
    /// - `Err(GameError::NotInVoice)` - Requester is not in a voice channel
    /// - `Err(GameError::NotEnoughPlayers)` - Fewer than two humans in the channel
    /// - `Err(GameError::SessionExists)` - The guild already has a game
    /// - `Err(GameError::NoSession)` - The game was ended before the start completed
    /// - `Err(AppError)` - Platform or store failure
    pub async fn start(&self, params: StartGameParams) -> Result<Session, AppError> {
        let guild_id = params.guild_id;

        let voice_channel = self
            .platform
            .member_voice_channel(guild_id, params.requester)
            .await?
            .ok_or(GameError::NotInVoice)?;

        let players: Vec<UserId> = self
            .platform
            .voice_members(guild_id, voice_channel.id)
            .await?
            .into_iter()
            .filter(|member| !member.bot)
            .map(|member| member.user_id)
            .collect();

        let teams = split_teams(&players, &mut rand::rng())?;

        if self.sessions.get(guild_id).await?.is_some() {
            return Err(GameError::SessionExists.into());
        }

        let mut session = Session::new(guild_id, voice_channel, teams);

        // Another start may have won the race since the check above
        if !self.sessions.insert_new(session.clone()).await? {
            return Err(GameError::SessionExists.into());
        }

        let announcement = match self
            .platform
            .post_announcement(
                params.channel_id,
                &session.render_announcement(AnnouncementStatus::Drafted),
            )
            .await
        {
            Ok(announcement) => announcement,
            Err(e) => {
                self.sessions.remove(guild_id).await?;
                return Err(e);
            }
        };

        session.announcement = Some(announcement);
        if !self.sessions.update(session.clone()).await? {
            tracing::warn!(
                "Game in guild {} ended before its announcement was recorded",
                guild_id
            );
            self.close_orphaned_announcement(&session).await;
            return Err(GameError::NoSession.into());
        }

        tracing::info!(
            "Drafted game in guild {} from channel {}: {} vs {} players",
            guild_id,
            session.original_channel.id,
            session.team_a.len(),
            session.team_b.len()
        );

        Ok(session)
    }

    /// Marks the announcement of a game that ended during its start as ended,
    /// which also removes its "Create game" button.
    async fn close_orphaned_announcement(&self, session: &Session) {
        let Some(message) = &session.announcement else {
            return;
        };

        if let Err(e) = self
            .platform
            .edit_announcement(message, &session.render_announcement(AnnouncementStatus::Ended))
            .await
        {
            tracing::warn!(
                "Failed to close announcement {} in channel {}: {}",
                message.message_id,
                message.channel_id,
                e
            );
        }
    }
}
