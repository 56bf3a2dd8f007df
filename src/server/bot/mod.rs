//! Discord bot integration for the team-split game.
//!
//! This module connects the game lifecycle to Discord. The event handler
//! registers the slash commands once the bot is ready and routes every
//! interaction (`/start-game`, `/end-game` and the "Create game" button) to the
//! `GameService`.
//!
//! The bot is started from `main` in a separate tokio task so that a gateway
//! failure is logged instead of tearing down the process silently.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild and channel cache used to resolve voice channels
//! - `GUILD_VOICE_STATES` - Voice state cache used to find who is in which channel
//! - `GUILD_MEMBERS` - Member cache used to tell bots apart from people (privileged intent)
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod commands;
pub mod handler;
pub mod start;
