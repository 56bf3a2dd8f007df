//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the bot, which sits between the
//! Discord event handlers and the session store / chat platform. Services are
//! responsible for:
//!
//! - **Business Logic**: The game state machine and its preconditions
//! - **Orchestration**: Coordinating session store updates with platform calls
//! - **Domain Models**: Working with domain models rather than Serenity types

pub mod game;
pub mod shuffle;
