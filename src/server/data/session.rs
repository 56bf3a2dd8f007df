//! Storage of in-progress game sessions.
//!
//! The lifecycle controller only talks to the `SessionStore` trait, so the
//! default in-memory map can be swapped for a persistent or shared store
//! without touching any transition logic. Every method is a single atomic step;
//! callers re-read the session at the start of each transition instead of
//! holding on to a stale copy.

use serenity::all::GuildId;
use serenity::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::server::{error::AppError, model::game::Session};

/// Keyed storage of at most one session per guild.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns a copy of the guild's session, if one exists.
    async fn get(&self, guild_id: GuildId) -> Result<Option<Session>, AppError>;

    /// Inserts a session unless the guild already has one.
    ///
    /// # Returns
    /// - `Ok(true)` - Session inserted
    /// - `Ok(false)` - Guild already had a session; nothing changed
    async fn insert_new(&self, session: Session) -> Result<bool, AppError>;

    /// Replaces the guild's existing session.
    ///
    /// Never creates an entry, so a session removed by a concurrent transition
    /// is not resurrected.
    ///
    /// # Returns
    /// - `Ok(true)` - Session replaced
    /// - `Ok(false)` - Guild had no session; nothing changed
    async fn update(&self, session: Session) -> Result<bool, AppError>;

    /// Removes and returns the guild's session.
    async fn remove(&self, guild_id: GuildId) -> Result<Option<Session>, AppError>;
}

/// Process-local session store.
///
/// Sessions are lost when the process restarts.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<GuildId, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, guild_id: GuildId) -> Result<Option<Session>, AppError> {
        Ok(self.sessions.read().await.get(&guild_id).cloned())
    }

    async fn insert_new(&self, session: Session) -> Result<bool, AppError> {
        let mut sessions = self.sessions.write().await;

        if sessions.contains_key(&session.guild_id) {
            return Ok(false);
        }

        sessions.insert(session.guild_id, session);
        Ok(true)
    }

    async fn update(&self, session: Session) -> Result<bool, AppError> {
        let mut sessions = self.sessions.write().await;

        match sessions.get_mut(&session.guild_id) {
            Some(existing) => {
                *existing = session;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, guild_id: GuildId) -> Result<Option<Session>, AppError> {
        Ok(self.sessions.write().await.remove(&guild_id))
    }
}
