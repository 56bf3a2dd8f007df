//! Team announcement rendering.
//!
//! Builds the embed and button row for the team announcement message so that
//! posting and editing render identically.

use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter,
    Timestamp, UserId,
};

use crate::server::model::game::{Announcement, TEAM_A_CHANNEL_NAME, TEAM_B_CHANNEL_NAME};

/// Custom id of the button that creates the team channels.
pub const MATERIALIZE_BUTTON_ID: &str = "materialize-game";

const AUTHOR: &str = "RandomTeamGen";
const EMPTY_ROSTER: &str = "—";

/// Formats a roster as one user mention per line.
///
/// # Arguments
/// - `members` - Team members in roster order
///
/// # Returns
/// - `String` - Newline-separated mentions, or a dash for an empty team
pub fn format_roster(members: &[UserId]) -> String {
    if members.is_empty() {
        return EMPTY_ROSTER.to_string();
    }

    members
        .iter()
        .map(|id| format!("<@{}>", id))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the announcement embed.
pub fn build_embed(announcement: &Announcement) -> CreateEmbed {
    CreateEmbed::new()
        .author(CreateEmbedAuthor::new(AUTHOR))
        .title("Game generated")
        .description(format!("Voice: **{}**", announcement.voice_channel_name))
        .field(TEAM_A_CHANNEL_NAME, format_roster(&announcement.team_a), true)
        .field(TEAM_B_CHANNEL_NAME, format_roster(&announcement.team_b), true)
        .footer(CreateEmbedFooter::new(announcement.status.footer()))
        .timestamp(Timestamp::now())
}

/// Builds the component rows for the announcement.
///
/// # Returns
/// - `Vec<CreateActionRow>` - A single row holding the "Create game" button
///   while the game is drafted, empty once it has ended
pub fn build_components(announcement: &Announcement) -> Vec<CreateActionRow> {
    if !announcement.status.has_control() {
        return vec![];
    }

    vec![CreateActionRow::Buttons(vec![CreateButton::new(
        MATERIALIZE_BUTTON_ID,
    )
    .label("Create game")
    .style(ButtonStyle::Success)])]
}
