use serenity::all::{ChannelId, GuildId, UserId};
use serenity::async_trait;
use std::collections::HashSet;

use crate::server::{
    data::session::{InMemorySessionStore, SessionStore},
    error::{game::GameError, AppError},
    model::game::{Session, StartGameParams},
    platform::fake::{FakePlatform, GUILD},
    service::game::GameService,
};


/// Guild with a "Squad" voice channel in a "Games" category and a text channel.
struct Fixture {
    platform: FakePlatform,
    sessions: InMemorySessionStore,
    category: ChannelId,
    squad: ChannelId,
    text: ChannelId,
}

impl Fixture {
    fn new() -> Self {
        let platform = FakePlatform::new();
        let category = platform.add_category("Games");
        let squad = platform.add_voice_channel("Squad", Some(category));
        let text = platform.add_text_channel("general");

        Self {
            platform,
            sessions: InMemorySessionStore::new(),
            category,
            squad,
            text,
        }
    }

    /// Fixture with `count` human players connected to "Squad".
    fn with_players(count: u64) -> Self {
        let fixture = Self::new();
        for n in 1..=count {
            fixture.platform.join(player(n), fixture.squad);
        }
        fixture
    }

    fn service(&self) -> GameService<'_, FakePlatform> {
        GameService::new(&self.platform, &self.sessions)
    }

    fn start_params(&self, requester: UserId) -> StartGameParams {
        StartGameParams {
            guild_id: GUILD,
            requester,
            channel_id: self.text,
        }
    }

    /// Starts a game requested by player 1, which must succeed.
    async fn start(&self) -> Session {
        self.service()
            .start(self.start_params(player(1)))
            .await
            .expect("start should succeed")
    }

    async fn session(&self) -> Option<Session> {
        self.sessions.get(GUILD).await.unwrap()
    }
}

/// Session store where a concurrent interaction always wins the race.
///
/// Wraps the fixture's store: `insert_new` finds a game started by someone
/// else, and `update` finds the game already ended (the session is removed).
struct RacingStore {
    inner: InMemorySessionStore,
    lose_insert: bool,
    lose_update: bool,
}

impl RacingStore {
    fn losing_insert(inner: &InMemorySessionStore) -> Self {
        Self {
            inner: inner.clone(),
            lose_insert: true,
            lose_update: false,
        }
    }

    fn losing_update(inner: &InMemorySessionStore) -> Self {
        Self {
            inner: inner.clone(),
            lose_insert: false,
            lose_update: true,
        }
    }
}

#[async_trait]
impl SessionStore for RacingStore {
    async fn get(&self, guild_id: GuildId) -> Result<Option<Session>, AppError> {
        self.inner.get(guild_id).await
    }

    async fn insert_new(&self, session: Session) -> Result<bool, AppError> {
        if self.lose_insert {
            return Ok(false);
        }
        self.inner.insert_new(session).await
    }

    async fn update(&self, session: Session) -> Result<bool, AppError> {
        if self.lose_update {
            self.inner.remove(session.guild_id).await?;
            return Ok(false);
        }
        self.inner.update(session).await
    }

    async fn remove(&self, guild_id: GuildId) -> Result<Option<Session>, AppError> {
        self.inner.remove(guild_id).await
    }
}

fn player(n: u64) -> UserId {
    UserId::new(100 + n)
}

fn players(count: u64) -> HashSet<UserId> {
    (1..=count).map(player).collect()
}

fn as_set(members: &[UserId]) -> HashSet<UserId> {
    members.iter().copied().collect()
}

/// Unwraps the user-facing game error of a failed operation.
fn expect_game_error<T: std::fmt::Debug>(result: Result<T, AppError>) -> GameError {
    match result {
        Err(AppError::GameErr(err)) => err,
        other => panic!("expected a game error, got {:?}", other),
    }
}
