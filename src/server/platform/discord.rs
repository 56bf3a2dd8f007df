//! Serenity-backed implementation of the chat platform adapter.
//!
//! Reads (voice occupancy, channel lookups, permissions) are answered from the
//! gateway cache, which requires the `GUILDS`, `GUILD_VOICE_STATES` and
//! `GUILD_MEMBERS` intents. Channel lookups fall back to the HTTP API when the
//! cache has not seen a channel yet. Writes always go through the HTTP client.
//!
//! Cache references are never held across an `.await`.

use serenity::all::{
    Cache, Channel, ChannelId, ChannelType, Context, CreateChannel, CreateMessage, EditMessage,
    GuildChannel, GuildId, Permissions, UserId,
};
use serenity::async_trait;
use serenity::http::Http;
use std::sync::Arc;

use crate::server::{
    error::AppError,
    model::game::{Announcement, AnnouncementRef, VoiceChannel, VoiceMember},
    platform::{announcement, VoicePlatform},
};

/// Chat platform adapter backed by Serenity's cache and HTTP client.
#[derive(Clone)]
pub struct SerenityPlatform {
    /// Gateway cache for guild, channel, member and voice state lookups
    cache: Arc<Cache>,
    /// Discord HTTP client for channel, member and message operations
    http: Arc<Http>,
}

impl SerenityPlatform {
    /// Creates a new SerenityPlatform instance.
    ///
    /// # Arguments
    /// - `cache` - Shared gateway cache
    /// - `http` - Arc-wrapped Discord HTTP client for API requests
    ///
    /// # Returns
    /// - `SerenityPlatform` - New adapter instance
    pub fn new(cache: Arc<Cache>, http: Arc<Http>) -> Self {
        Self { cache, http }
    }

    /// Creates an adapter sharing the cache and HTTP client of an event context.
    pub fn from_context(ctx: &Context) -> Self {
        Self::new(ctx.cache.clone(), ctx.http.clone())
    }

    fn guild_not_cached(guild_id: GuildId) -> AppError {
        AppError::NotFound(format!("Guild {} is not in the cache", guild_id))
    }
}

/// Converts a guild channel into a `VoiceChannel` if it is a voice channel.
fn to_voice_channel(channel: &GuildChannel) -> Option<VoiceChannel> {
    (channel.kind == ChannelType::Voice).then(|| VoiceChannel {
        id: channel.id,
        name: channel.name.clone(),
        parent_id: channel.parent_id,
    })
}

/// Whether an HTTP error means the requested resource does not exist.
///
/// Rate limits, server errors and timeouts say nothing about existence and
/// must not be mistaken for a deleted channel.
fn is_unknown_resource(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Http(http_err) => http_err
            .status_code()
            .is_some_and(|status| status.as_u16() == 404),
        _ => false,
    }
}

#[async_trait]
impl VoicePlatform for SerenityPlatform {
    async fn member_voice_channel(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Option<VoiceChannel>, AppError> {
        let channel_id = {
            let guild = self
                .cache
                .guild(guild_id)
                .ok_or_else(|| Self::guild_not_cached(guild_id))?;

            guild
                .voice_states
                .get(&user_id)
                .and_then(|state| state.channel_id)
        };

        match channel_id {
            Some(channel_id) => self.voice_channel(guild_id, channel_id).await,
            None => Ok(None),
        }
    }

    async fn voice_members(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Vec<VoiceMember>, AppError> {
        let guild = self
            .cache
            .guild(guild_id)
            .ok_or_else(|| Self::guild_not_cached(guild_id))?;

        let members = guild
            .voice_states
            .values()
            .filter(|state| state.channel_id == Some(channel_id))
            .map(|state| {
                let bot = state
                    .member
                    .as_ref()
                    .or_else(|| guild.members.get(&state.user_id))
                    .is_some_and(|member| member.user.bot);

                VoiceMember {
                    user_id: state.user_id,
                    bot,
                }
            })
            .collect();

        Ok(members)
    }

    async fn voice_channel(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Option<VoiceChannel>, AppError> {
        let cached = self
            .cache
            .guild(guild_id)
            .and_then(|guild| guild.channels.get(&channel_id).map(to_voice_channel));
        if let Some(channel) = cached {
            return Ok(channel);
        }

        // Channel not cached yet (or already evicted), ask the API
        match self.http.get_channel(channel_id).await {
            Ok(Channel::Guild(channel)) if channel.guild_id == guild_id => {
                Ok(to_voice_channel(&channel))
            }
            Ok(_) => Ok(None),
            Err(e) if is_unknown_resource(&e) => {
                tracing::debug!(
                    "Channel {} in guild {} no longer exists",
                    channel_id,
                    guild_id
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn create_voice_channel(
        &self,
        guild_id: GuildId,
        name: &str,
        parent_id: Option<ChannelId>,
        reason: &str,
    ) -> Result<ChannelId, AppError> {
        let mut builder = CreateChannel::new(name)
            .kind(ChannelType::Voice)
            .audit_log_reason(reason);
        if let Some(parent_id) = parent_id {
            builder = builder.category(parent_id);
        }

        let channel = guild_id.create_channel(&self.http, builder).await?;

        Ok(channel.id)
    }

    async fn move_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        channel_id: Option<ChannelId>,
    ) -> Result<(), AppError> {
        match channel_id {
            Some(channel_id) => {
                guild_id
                    .move_member(&self.http, user_id, channel_id)
                    .await?;
            }
            None => {
                guild_id.disconnect_member(&self.http, user_id).await?;
            }
        }

        Ok(())
    }

    async fn delete_channel(&self, channel_id: ChannelId, reason: &str) -> Result<(), AppError> {
        self.http.delete_channel(channel_id, Some(reason)).await?;

        Ok(())
    }

    async fn post_announcement(
        &self,
        channel_id: ChannelId,
        content: &Announcement,
    ) -> Result<AnnouncementRef, AppError> {
        let message = CreateMessage::new()
            .embed(announcement::build_embed(content))
            .components(announcement::build_components(content));

        let sent = channel_id.send_message(&self.http, message).await?;

        Ok(AnnouncementRef {
            channel_id: sent.channel_id,
            message_id: sent.id,
        })
    }

    async fn edit_announcement(
        &self,
        message: &AnnouncementRef,
        content: &Announcement,
    ) -> Result<(), AppError> {
        let edit = EditMessage::new()
            .embed(announcement::build_embed(content))
            .components(announcement::build_components(content));

        message
            .channel_id
            .edit_message(&self.http, message.message_id, edit)
            .await?;

        Ok(())
    }

    async fn bot_permissions(
        &self,
        guild_id: GuildId,
        channel_id: Option<ChannelId>,
    ) -> Result<Permissions, AppError> {
        let bot_id = self.cache.current_user().id;
        let guild = self
            .cache
            .guild(guild_id)
            .ok_or_else(|| Self::guild_not_cached(guild_id))?;
        let member = guild.members.get(&bot_id).ok_or_else(|| {
            AppError::NotFound(format!("Bot member is not cached for guild {}", guild_id))
        })?;

        // A channel that was created moments ago may not be cached yet; the guild
        // level permissions are the best answer available for it.
        let permissions = match channel_id.and_then(|id| guild.channels.get(&id)) {
            Some(channel) => guild.user_permissions_in(channel, member),
            #[allow(deprecated)]
            None => guild.member_permissions(member),
        };

        Ok(permissions)
    }
}
