//! Bot backend and business logic.
//!
//! This module contains the complete implementation of the team-split bot:
//! Discord integration, the game session lifecycle, and the infrastructure
//! around it. Serenity provides the gateway connection, cache and HTTP client.
//!
//! # Architecture
//!
//! The bot follows a layered architecture with clear separation of concerns:
//!
//! - **Bot Layer** (`bot/`) - Discord event handlers, slash commands and interaction replies
//! - **Service Layer** (`service/`) - Game state machine and team shuffling
//! - **Data Layer** (`data/`) - Session storage
//! - **Platform Layer** (`platform/`) - Chat platform adapter used by the services
//! - **Model Layer** (`model/`) - Domain models and operation reports
//! - **Error Layer** (`error/`) - Application error types and user-facing messages
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **Startup** (`startup`) - Logging and panic reporting setup
//!
//! # Interaction Flow
//!
//! 1. **Bot** receives an interaction and acknowledges it
//! 2. **Service** re-reads the guild's session and checks preconditions
//! 3. **Service** drives the **Platform** (channels, moves, messages)
//! 4. **Service** updates or removes the session in the **Data** layer
//! 5. **Bot** replies to the member with the outcome or the error

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod platform;
pub mod service;
pub mod startup;
