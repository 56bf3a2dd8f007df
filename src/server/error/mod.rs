//! Error types and user-facing error reporting.
//!
//! This module provides the bot's error hierarchy. The `AppError` enum is the
//! top-level error type returned by every service and platform operation. It
//! wraps domain-specific errors and decides what the member who triggered an
//! interaction gets to see.

pub mod config;
pub mod game;

use thiserror::Error;

use crate::server::error::{config::ConfigError, game::GameError};

/// Reply shown to members when an unexpected failure occurs.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong, please try again.";

/// Top-level application error type.
///
/// Aggregates every error that can occur in the bot. Most variants use
/// `#[from]` for automatic conversion. `GameErr` carries conditions the member
/// caused and can fix, every other variant is an unexpected failure.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Precondition or permission failure in the game lifecycle.
    ///
    /// Reported verbatim to the requester.
    #[error(transparent)]
    GameErr(#[from] GameError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Internal error with custom message.
    ///
    /// # Fields
    /// - Detailed error message for logging
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Converts the error into the message shown to the requester.
    ///
    /// Game errors are user-facing and returned as-is. Everything else is logged
    /// with full details and replaced by a generic message to avoid leaking
    /// implementation details into Discord.
    ///
    /// # Returns
    /// - `String` - Message suitable for an ephemeral interaction reply
    pub fn user_message(&self) -> String {
        match self {
            Self::GameErr(err) => {
                tracing::debug!("Interaction rejected: {}", err);
                err.to_string()
            }
            err => {
                tracing::error!("Interaction failed: {}", err);
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}
