use serenity::all::GuildId;

use crate::server::error::{config::ConfigError, AppError};

pub struct Config {
    pub discord_bot_token: String,

    /// Guild to register slash commands in. Commands are registered globally
    /// when unset.
    pub discord_guild_id: Option<GuildId>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            discord_guild_id: parse_guild_id(std::env::var("DISCORD_GUILD_ID").ok())?,
        })
    }
}

/// Parses the optional command registration guild.
///
/// # Arguments
/// - `value` - Raw value of `DISCORD_GUILD_ID`, if set
///
/// # Returns
/// - `Ok(None)` - Variable unset or blank
/// - `Ok(Some(GuildId))` - Valid non-zero snowflake
/// - `Err(ConfigError::InvalidEnvVar)` - Not a valid snowflake
fn parse_guild_id(value: Option<String>) -> Result<Option<GuildId>, ConfigError> {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };

    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        name: "DISCORD_GUILD_ID".to_string(),
        reason,
    };

    let id = value
        .trim()
        .parse::<u64>()
        .map_err(|e| invalid(e.to_string()))?;
    if id == 0 {
        return Err(invalid("guild id cannot be 0".to_string()));
    }

    Ok(Some(GuildId::new(id)))
}
