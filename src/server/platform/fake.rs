//! In-memory chat platform for lifecycle tests.
//!
//! Simulates a single guild with channels, voice states and bot permissions.
//! Individual operations can be made to fail to exercise the error paths of the
//! game lifecycle.

use serenity::all::{ChannelId, GuildId, MessageId, Permissions, UserId};
use serenity::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::server::{
    error::AppError,
    model::game::{Announcement, AnnouncementRef, VoiceChannel, VoiceMember},
    platform::VoicePlatform,
};

/// Guild simulated by [`FakePlatform`].
pub const GUILD: GuildId = GuildId::new(1);

/// Permissions the bot needs for a complete game.
pub const FULL_PERMISSIONS: Permissions = Permissions::MANAGE_CHANNELS
    .union(Permissions::MOVE_MEMBERS)
    .union(Permissions::VIEW_CHANNEL)
    .union(Permissions::CONNECT);

#[derive(Debug, Clone)]
struct FakeChannel {
    name: String,
    parent_id: Option<ChannelId>,
    voice: bool,
}

struct FakeGuild {
    next_id: u64,
    channels: HashMap<ChannelId, FakeChannel>,
    voice_states: HashMap<UserId, ChannelId>,
    bots: HashSet<UserId>,
    permissions: Permissions,
    channel_permissions: HashMap<ChannelId, Permissions>,
    failing_channel_names: HashSet<String>,
    locked_members: HashSet<UserId>,
    failing_deletes: HashSet<ChannelId>,
    failing_lookups: HashSet<ChannelId>,
    failing_messages: bool,
    messages: HashMap<MessageId, (ChannelId, Announcement)>,
    created: Vec<ChannelId>,
}

impl FakeGuild {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

fn failure(message: impl Into<String>) -> AppError {
    AppError::InternalError(message.into())
}

/// In-memory implementation of [`VoicePlatform`].
pub struct FakePlatform {
    guild: Mutex<FakeGuild>,
}

impl FakePlatform {
    /// Creates an empty guild where the bot holds every permission a game needs.
    pub fn new() -> Self {
        Self {
            guild: Mutex::new(FakeGuild {
                next_id: 1000,
                channels: HashMap::new(),
                voice_states: HashMap::new(),
                bots: HashSet::new(),
                permissions: FULL_PERMISSIONS,
                channel_permissions: HashMap::new(),
                failing_channel_names: HashSet::new(),
                locked_members: HashSet::new(),
                failing_deletes: HashSet::new(),
                failing_lookups: HashSet::new(),
                failing_messages: false,
                messages: HashMap::new(),
                created: Vec::new(),
            }),
        }
    }

    pub fn add_category(&self, name: &str) -> ChannelId {
        self.add_channel(name, None, false)
    }

    pub fn add_voice_channel(&self, name: &str, parent_id: Option<ChannelId>) -> ChannelId {
        self.add_channel(name, parent_id, true)
    }

    pub fn add_text_channel(&self, name: &str) -> ChannelId {
        self.add_channel(name, None, false)
    }

    fn add_channel(&self, name: &str, parent_id: Option<ChannelId>, voice: bool) -> ChannelId {
        let mut guild = self.guild.lock().unwrap();
        let id = ChannelId::new(guild.next_id());
        guild.channels.insert(
            id,
            FakeChannel {
                name: name.to_string(),
                parent_id,
                voice,
            },
        );
        id
    }

    /// Connects a member to a voice channel.
    pub fn join(&self, user_id: UserId, channel_id: ChannelId) {
        self.guild
            .lock()
            .unwrap()
            .voice_states
            .insert(user_id, channel_id);
    }

    /// Connects a bot account to a voice channel.
    pub fn join_bot(&self, user_id: UserId, channel_id: ChannelId) {
        let mut guild = self.guild.lock().unwrap();
        guild.bots.insert(user_id);
        guild.voice_states.insert(user_id, channel_id);
    }

    /// Disconnects a member from voice.
    pub fn leave(&self, user_id: UserId) {
        self.guild.lock().unwrap().voice_states.remove(&user_id);
    }

    /// Deletes a channel outside of the bot, disconnecting its occupants.
    pub fn remove_channel(&self, channel_id: ChannelId) {
        let mut guild = self.guild.lock().unwrap();
        guild.channels.remove(&channel_id);
        guild.voice_states.retain(|_, channel| *channel != channel_id);
    }

    pub fn set_permissions(&self, permissions: Permissions) {
        self.guild.lock().unwrap().permissions = permissions;
    }

    pub fn set_channel_permissions(&self, channel_id: ChannelId, permissions: Permissions) {
        self.guild
            .lock()
            .unwrap()
            .channel_permissions
            .insert(channel_id, permissions);
    }

    /// Makes creation of channels with this name fail.
    pub fn fail_channel_creation(&self, name: &str) {
        self.guild
            .lock()
            .unwrap()
            .failing_channel_names
            .insert(name.to_string());
    }

    /// Allows channels with this name to be created again.
    pub fn allow_channel_creation(&self, name: &str) {
        self.guild
            .lock()
            .unwrap()
            .failing_channel_names
            .remove(name);
    }

    /// Makes every move of this member fail, as if they lacked access.
    pub fn lock_member(&self, user_id: UserId) {
        self.guild.lock().unwrap().locked_members.insert(user_id);
    }

    pub fn fail_deletion(&self, channel_id: ChannelId) {
        self.guild.lock().unwrap().failing_deletes.insert(channel_id);
    }

    /// Makes lookups of this channel fail, as with a rate limited API.
    pub fn fail_lookup(&self, channel_id: ChannelId) {
        self.guild.lock().unwrap().failing_lookups.insert(channel_id);
    }

    /// Makes posting and editing announcements fail.
    pub fn fail_messages(&self) {
        self.guild.lock().unwrap().failing_messages = true;
    }

    pub fn occupants(&self, channel_id: ChannelId) -> HashSet<UserId> {
        self.guild
            .lock()
            .unwrap()
            .voice_states
            .iter()
            .filter(|(_, channel)| **channel == channel_id)
            .map(|(user, _)| *user)
            .collect()
    }

    pub fn member_channel(&self, user_id: UserId) -> Option<ChannelId> {
        self.guild
            .lock()
            .unwrap()
            .voice_states
            .get(&user_id)
            .copied()
    }

    pub fn channel_exists(&self, channel_id: ChannelId) -> bool {
        self.guild.lock().unwrap().channels.contains_key(&channel_id)
    }

    pub fn channel_parent(&self, channel_id: ChannelId) -> Option<ChannelId> {
        self.guild
            .lock()
            .unwrap()
            .channels
            .get(&channel_id)
            .and_then(|channel| channel.parent_id)
    }

    /// Returns every channel created through the platform with this name.
    pub fn created_named(&self, name: &str) -> Vec<ChannelId> {
        let guild = self.guild.lock().unwrap();
        guild
            .created
            .iter()
            .filter(|id| {
                guild
                    .channels
                    .get(id)
                    .is_some_and(|channel| channel.name == name)
            })
            .copied()
            .collect()
    }

    pub fn created_count(&self) -> usize {
        self.guild.lock().unwrap().created.len()
    }

    pub fn message_count(&self) -> usize {
        self.guild.lock().unwrap().messages.len()
    }

    /// Every announcement posted so far, in posting order.
    pub fn announcements(&self) -> Vec<Announcement> {
        let guild = self.guild.lock().unwrap();
        let mut posted: Vec<_> = guild.messages.iter().collect();
        posted.sort_by_key(|(id, _)| **id);
        posted
            .into_iter()
            .map(|(_, (_, announcement))| announcement.clone())
            .collect()
    }

    pub fn announcement(&self, message: &AnnouncementRef) -> Option<Announcement> {
        self.guild
            .lock()
            .unwrap()
            .messages
            .get(&message.message_id)
            .map(|(_, announcement)| announcement.clone())
    }
}

#[async_trait]
impl VoicePlatform for FakePlatform {
    async fn member_voice_channel(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Option<VoiceChannel>, AppError> {
        let channel_id = self.member_channel(user_id);

        match channel_id {
            Some(channel_id) => self.voice_channel(guild_id, channel_id).await,
            None => Ok(None),
        }
    }

    async fn voice_members(
        &self,
        _guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Vec<VoiceMember>, AppError> {
        let guild = self.guild.lock().unwrap();
        let mut members: Vec<VoiceMember> = guild
            .voice_states
            .iter()
            .filter(|(_, channel)| **channel == channel_id)
            .map(|(user_id, _)| VoiceMember {
                user_id: *user_id,
                bot: guild.bots.contains(user_id),
            })
            .collect();
        members.sort_by_key(|member| member.user_id);

        Ok(members)
    }

    async fn voice_channel(
        &self,
        _guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Option<VoiceChannel>, AppError> {
        let guild = self.guild.lock().unwrap();
        if guild.failing_lookups.contains(&channel_id) {
            return Err(failure(format!("Rate limited fetching channel {}", channel_id)));
        }

        Ok(guild
            .channels
            .get(&channel_id)
            .filter(|channel| channel.voice)
            .map(|channel| VoiceChannel {
                id: channel_id,
                name: channel.name.clone(),
                parent_id: channel.parent_id,
            }))
    }

    async fn create_voice_channel(
        &self,
        _guild_id: GuildId,
        name: &str,
        parent_id: Option<ChannelId>,
        _reason: &str,
    ) -> Result<ChannelId, AppError> {
        let mut guild = self.guild.lock().unwrap();
        if guild.failing_channel_names.contains(name) {
            return Err(failure(format!("Missing Permissions: cannot create {}", name)));
        }

        let id = ChannelId::new(guild.next_id());
        guild.channels.insert(
            id,
            FakeChannel {
                name: name.to_string(),
                parent_id,
                voice: true,
            },
        );
        guild.created.push(id);

        Ok(id)
    }

    async fn move_member(
        &self,
        _guild_id: GuildId,
        user_id: UserId,
        channel_id: Option<ChannelId>,
    ) -> Result<(), AppError> {
        let mut guild = self.guild.lock().unwrap();
        if guild.locked_members.contains(&user_id) {
            return Err(failure(format!("Missing Access: cannot move {}", user_id)));
        }
        if !guild.voice_states.contains_key(&user_id) {
            return Err(failure(format!("Target user {} is not connected to voice", user_id)));
        }

        match channel_id {
            Some(channel_id) => {
                if !guild.channels.contains_key(&channel_id) {
                    return Err(failure(format!("Unknown Channel {}", channel_id)));
                }
                guild.voice_states.insert(user_id, channel_id);
            }
            None => {
                guild.voice_states.remove(&user_id);
            }
        }

        Ok(())
    }

    async fn delete_channel(&self, channel_id: ChannelId, _reason: &str) -> Result<(), AppError> {
        let mut guild = self.guild.lock().unwrap();
        if guild.failing_deletes.contains(&channel_id) {
            return Err(failure(format!("Missing Permissions: cannot delete {}", channel_id)));
        }
        if guild.channels.remove(&channel_id).is_none() {
            return Err(AppError::NotFound(format!("Unknown Channel {}", channel_id)));
        }
        guild.voice_states.retain(|_, channel| *channel != channel_id);

        Ok(())
    }

    async fn post_announcement(
        &self,
        channel_id: ChannelId,
        announcement: &Announcement,
    ) -> Result<AnnouncementRef, AppError> {
        let mut guild = self.guild.lock().unwrap();
        if guild.failing_messages {
            return Err(failure("Missing Permissions: cannot send messages"));
        }

        let message_id = MessageId::new(guild.next_id());
        guild
            .messages
            .insert(message_id, (channel_id, announcement.clone()));

        Ok(AnnouncementRef {
            channel_id,
            message_id,
        })
    }

    async fn edit_announcement(
        &self,
        message: &AnnouncementRef,
        announcement: &Announcement,
    ) -> Result<(), AppError> {
        let mut guild = self.guild.lock().unwrap();
        if guild.failing_messages {
            return Err(failure("Missing Permissions: cannot edit messages"));
        }

        match guild.messages.get_mut(&message.message_id) {
            Some(stored) => {
                stored.1 = announcement.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "Unknown Message {}",
                message.message_id
            ))),
        }
    }

    async fn bot_permissions(
        &self,
        _guild_id: GuildId,
        channel_id: Option<ChannelId>,
    ) -> Result<Permissions, AppError> {
        let guild = self.guild.lock().unwrap();

        Ok(channel_id
            .and_then(|id| guild.channel_permissions.get(&id).copied())
            .unwrap_or(guild.permissions))
    }
}
