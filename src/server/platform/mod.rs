//! Chat platform adapter.
//!
//! The game lifecycle never calls Discord directly. Everything it needs from the
//! platform (voice occupancy, channel management, member moves, the team
//! announcement and permission checks) goes through the `VoicePlatform` trait.
//! `SerenityPlatform` is the production implementation backed by Serenity's
//! cache and HTTP client; tests use an in-memory fake.

pub mod announcement;
pub mod discord;

#[cfg(test)]
pub mod fake;

use serenity::all::{ChannelId, GuildId, Permissions, UserId};
use serenity::async_trait;

use crate::server::{
    error::AppError,
    model::game::{Announcement, AnnouncementRef, VoiceChannel, VoiceMember},
};

pub use discord::SerenityPlatform;

/// Operations the game lifecycle performs against the chat platform.
#[async_trait]
pub trait VoicePlatform: Send + Sync {
    /// Returns the voice channel the member is connected to, if any.
    async fn member_voice_channel(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Option<VoiceChannel>, AppError>;

    /// Lists the members currently connected to a voice channel.
    ///
    /// Returns an empty list for channels that no longer exist.
    async fn voice_members(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Vec<VoiceMember>, AppError>;

    /// Looks up a channel, returning it only if it still exists and is a voice
    /// channel.
    async fn voice_channel(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Option<VoiceChannel>, AppError>;

    /// Creates a voice channel, optionally nested in a category.
    async fn create_voice_channel(
        &self,
        guild_id: GuildId,
        name: &str,
        parent_id: Option<ChannelId>,
        reason: &str,
    ) -> Result<ChannelId, AppError>;

    /// Moves a member to a voice channel, or disconnects them when `channel_id`
    /// is `None`.
    async fn move_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        channel_id: Option<ChannelId>,
    ) -> Result<(), AppError>;

    async fn delete_channel(&self, channel_id: ChannelId, reason: &str) -> Result<(), AppError>;

    /// Posts the team announcement with its "Create game" control.
    async fn post_announcement(
        &self,
        channel_id: ChannelId,
        announcement: &Announcement,
    ) -> Result<AnnouncementRef, AppError>;

    /// Replaces the content and controls of a previously posted announcement.
    async fn edit_announcement(
        &self,
        message: &AnnouncementRef,
        announcement: &Announcement,
    ) -> Result<(), AppError>;

    /// Effective permissions of the bot in the guild, or in a specific channel
    /// when `channel_id` is given.
    async fn bot_permissions(
        &self,
        guild_id: GuildId,
        channel_id: Option<ChannelId>,
    ) -> Result<Permissions, AppError>;
}
