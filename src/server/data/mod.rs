//! Storage layer for game state.
//!
//! Sessions live behind the `SessionStore` trait so the lifecycle controller
//! does not depend on where they are kept. The bot ships with an in-memory
//! store; nothing is persisted across restarts.

pub mod session;
