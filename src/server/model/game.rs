//! Domain models for team-split game sessions.
//!
//! A `Session` is the per-guild record of one game: where the players came
//! from, how they were split, which temporary channels were created for them
//! and which message announced the split. The remaining types are the inputs
//! and reports of the lifecycle operations in `service::game`.

use serenity::all::{ChannelId, GuildId, MessageId, UserId};

use crate::server::service::shuffle::Teams;

/// Name of the temporary voice channel created for team A.
pub const TEAM_A_CHANNEL_NAME: &str = "Team A";
/// Name of the temporary voice channel created for team B.
pub const TEAM_B_CHANNEL_NAME: &str = "Team B";
/// Name of the fallback channel created when the original voice channel is gone.
pub const LOBBY_CHANNEL_NAME: &str = "Lobby";

/// One of the two teams of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::A, Team::B];

    /// Name of the voice channel created for this team.
    pub fn channel_name(self) -> &'static str {
        match self {
            Team::A => TEAM_A_CHANNEL_NAME,
            Team::B => TEAM_B_CHANNEL_NAME,
        }
    }
}

/// A guild voice channel as seen by the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceChannel {
    pub id: ChannelId,
    pub name: String,
    /// Category the channel is nested in, if any.
    pub parent_id: Option<ChannelId>,
}

/// A member currently connected to a voice channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceMember {
    pub user_id: UserId,
    /// Whether the account is automated. Bots never take part in a split.
    pub bot: bool,
}

/// Location of the announcement message so it can be edited later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnouncementRef {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

/// Lifecycle state of an existing session.
///
/// A guild without a session is idle; there is no variant for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Teams are assigned, team channels are not (fully) created.
    Drafted,
    /// Both team channels exist and members have been moved.
    Active,
}

/// In-progress game for a single guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub guild_id: GuildId,
    /// Voice channel the players were drawn from and return to.
    pub original_channel: VoiceChannel,
    pub team_a: Vec<UserId>,
    pub team_b: Vec<UserId>,
    pub channel_a: Option<ChannelId>,
    pub channel_b: Option<ChannelId>,
    pub announcement: Option<AnnouncementRef>,
}

impl Session {
    /// Creates a drafted session from a team split.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the game runs in
    /// - `original_channel` - Voice channel the players were drawn from
    /// - `teams` - Shuffled team rosters
    ///
    /// # Returns
    /// - `Session` - New session with no team channels and no announcement
    pub fn new(guild_id: GuildId, original_channel: VoiceChannel, teams: Teams<UserId>) -> Self {
        Self {
            guild_id,
            original_channel,
            team_a: teams.a,
            team_b: teams.b,
            channel_a: None,
            channel_b: None,
            announcement: None,
        }
    }

    pub fn state(&self) -> GameState {
        match (self.channel_a, self.channel_b) {
            (Some(_), Some(_)) => GameState::Active,
            _ => GameState::Drafted,
        }
    }

    pub fn roster(&self, team: Team) -> &[UserId] {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }

    pub fn channel(&self, team: Team) -> Option<ChannelId> {
        match team {
            Team::A => self.channel_a,
            Team::B => self.channel_b,
        }
    }

    /// Records the temporary channel created for a team.
    pub fn set_channel(&mut self, team: Team, channel_id: ChannelId) {
        match team {
            Team::A => self.channel_a = Some(channel_id),
            Team::B => self.channel_b = Some(channel_id),
        }
    }

    /// Builds the announcement content for this session.
    pub fn render_announcement(&self, status: AnnouncementStatus) -> Announcement {
        Announcement {
            voice_channel_name: self.original_channel.name.clone(),
            team_a: self.team_a.clone(),
            team_b: self.team_b.clone(),
            status,
        }
    }
}

/// Stage of the game shown in the announcement footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementStatus {
    Drafted,
    Ended,
}

impl AnnouncementStatus {
    pub fn footer(self) -> &'static str {
        match self {
            AnnouncementStatus::Drafted => "Draft created",
            AnnouncementStatus::Ended => "Game ended",
        }
    }

    /// Whether the "Create game" button is attached.
    pub fn has_control(self) -> bool {
        matches!(self, AnnouncementStatus::Drafted)
    }
}

/// Content of the team announcement message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub voice_channel_name: String,
    pub team_a: Vec<UserId>,
    pub team_b: Vec<UserId>,
    pub status: AnnouncementStatus,
}

/// Parameters of a start-game request.
#[derive(Debug, Clone, Copy)]
pub struct StartGameParams {
    pub guild_id: GuildId,
    /// Member who ran the command
    pub requester: UserId,
    /// Text channel the command was run in; receives the announcement
    pub channel_id: ChannelId,
}

/// Outcome of a best-effort batch of member moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: Vec<UserId>,
    pub failed: Vec<UserId>,
}

/// Outcome of creating the team channels and moving the teams into them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    pub channel_a: ChannelId,
    pub channel_b: ChannelId,
    pub team_a: BatchReport,
    pub team_b: BatchReport,
}

impl MaterializeReport {
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Game created! Moved {} to {} and {} to {}.",
            self.team_a.succeeded.len(),
            TEAM_A_CHANNEL_NAME,
            self.team_b.succeeded.len(),
            TEAM_B_CHANNEL_NAME,
        );
        let failed = self.team_a.failed.len() + self.team_b.failed.len();
        if failed > 0 {
            summary.push_str(&format!(
                " {} member(s) could not be moved (not in voice?).",
                failed
            ));
        }
        summary
    }
}

/// Cleanup outcome for one team channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamTeardown {
    pub moves: BatchReport,
    /// Members still in the channel after the move attempt.
    pub remaining: usize,
    /// Whether the channel was deleted (or was already gone).
    pub removed: bool,
}

/// Outcome of ending a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndReport {
    /// Channel everyone was moved back to.
    pub destination: ChannelId,
    /// Whether a fallback lobby had to be created.
    pub lobby_created: bool,
    pub team_a: TeamTeardown,
    pub team_b: TeamTeardown,
}

impl EndReport {
    pub fn summary(&self) -> String {
        let destination = if self.lobby_created {
            format!("the new {} channel", LOBBY_CHANNEL_NAME)
        } else {
            "the original channel".to_string()
        };
        let mut summary = format!("Game ended. Moved everyone back to {}.", destination);

        for (team, teardown) in [(Team::A, &self.team_a), (Team::B, &self.team_b)] {
            summary.push_str(&format!(
                "\n{}: {} moved, {} remaining",
                team.channel_name(),
                teardown.moves.succeeded.len(),
                teardown.remaining,
            ));
            if !teardown.removed {
                summary.push_str(" (channel kept)");
            }
        }
        summary
    }
}
