//! Server-side domain models and parameter types.
//!
//! This module contains the domain models used throughout the service layer:
//! the per-guild game session, the platform-agnostic views of voice channels
//! and members, and the reports returned by the lifecycle operations.

pub mod game;
