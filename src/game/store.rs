use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::framework::GameConfig;

use super::{Attempt, Clock, Cooldown, GameState, Session, StartGame, SystemClock, UserId};

/// Every user's [`Session`], created on first access and kept for the life of
/// the store.
///
/// Clones share the same sessions.
#[derive(Debug)]
pub struct SessionStore<C = SystemClock> {
    sessions: Arc<RwLock<HashMap<UserId, Session>>>,
    config: Arc<GameConfig>,
    clock: Arc<C>,
}

impl<C> Clone for SessionStore<C> {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            config: self.config.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SessionStore<C> {
    pub fn with_clock(config: GameConfig, clock: C) -> Self {
        Self {
            sessions: Arc::default(),
            config: Arc::new(config),
            clock: Arc::new(clock),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    async fn read<R>(&self, user_id: UserId, f: impl FnOnce(&Session) -> R) -> R {
        {
            let guard = self.sessions.read().await;
            if let Some(session) = guard.get(&user_id) {
                return f(session);
            }
        }

        self.write(user_id, |session| f(&*session)).await
    }

    async fn write<R>(&self, user_id: UserId, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut guard = self.sessions.write().await;
        let session = guard.entry(user_id).or_insert_with(|| {
            debug!(user.id = %user_id, "created session");
            Session::new(user_id, self.config.attempts())
        });

        f(session)
    }

    /// Snapshot of the user's session.
    pub async fn get_session(&self, user_id: UserId) -> Session {
        self.read(user_id, Session::clone).await
    }

    /// Resets the session to a fresh game, unless a cooldown is still running.
    ///
    /// An expired cooldown does not block, but its state is left for
    /// [`check_cooldown`](Self::check_cooldown) to clear.
    #[instrument(skip_all, fields(user.id = %user_id))]
    pub async fn start_game(&self, user_id: UserId) -> StartGame {
        let now = self.clock.now();
        let attempts = self.config.attempts();

        let start = self.write(user_id, |session| session.start(now, attempts)).await;

        match start {
            StartGame::Started => info!("started game"),
            StartGame::OnCooldown { remaining } => debug!(remaining, "still on cooldown"),
        }

        start
    }

    /// Counts one guess. There is no floor, so this keeps going below zero.
    #[instrument(skip_all, fields(user.id = %user_id))]
    pub async fn use_attempt(&self, user_id: UserId) -> Attempt {
        let attempt = self.write(user_id, Session::use_attempt).await;
        debug!(left = attempt.left, "used attempt");
        attempt
    }

    pub async fn attempts_left(&self, user_id: UserId) -> i32 {
        self.read(user_id, Session::attempts_left).await
    }

    /// Records a hint for a game in progress.
    ///
    /// Returns `false` if no game is in progress, or if this hint goes past
    /// the configured limit. Hints past the limit are still recorded, so the
    /// caller has to stop offering them.
    #[instrument(skip_all, fields(user.id = %user_id))]
    pub async fn add_hint(&self, user_id: UserId, riddle: impl Into<String>) -> bool {
        let max_hints = self.config.hints();
        let riddle = riddle.into();

        let added = self
            .write(user_id, |session| session.add_hint(riddle, max_hints))
            .await;

        match added {
            Some(true) => true,
            Some(false) => {
                debug!(max_hints, "hint not within limit");
                false
            }
            None => {
                debug!("no game in progress");
                false
            }
        }
    }

    /// Puts the user on cooldown for `duration_secs` from now. Negative
    /// durations are accepted and give an already expired cooldown.
    #[instrument(skip_all, fields(user.id = %user_id))]
    pub async fn set_cooldown(&self, user_id: UserId, duration_secs: i64) {
        let now = self.clock.now();

        self.write(user_id, |session| session.set_cooldown(now, duration_secs))
            .await;

        info!(duration_secs, "set cooldown");
    }

    /// Clears the cooldown state if it has run out.
    #[instrument(skip_all, fields(user.id = %user_id))]
    pub async fn check_cooldown(&self, user_id: UserId) -> Cooldown {
        let now = self.clock.now();

        self.write(user_id, |session| {
            let was_cooldown = session.state() == GameState::Cooldown;
            let cooldown = session.check_cooldown(now);

            if was_cooldown && !cooldown.is_active() {
                debug!("cooldown expired");
            }

            cooldown
        })
        .await
    }

    #[instrument(skip_all, fields(user.id = %user_id))]
    pub async fn set_waiting_for_wallet(&self, user_id: UserId) {
        self.write(user_id, Session::set_waiting_for_wallet).await;
        info!("waiting for wallet address");
    }

    pub async fn is_waiting_for_wallet(&self, user_id: UserId) -> bool {
        self.read(user_id, Session::is_waiting_for_wallet).await
    }

    pub async fn hint_count(&self, user_id: UserId) -> u32 {
        self.read(user_id, Session::hint_count).await
    }

    pub async fn last_hint(&self, user_id: UserId) -> String {
        self.read(user_id, |session| session.last_hint().to_owned())
            .await
    }

    pub async fn set_current_coin(&self, user_id: UserId, coin: impl Into<String>) {
        let coin = coin.into();
        self.write(user_id, |session| session.set_current_coin(coin))
            .await;
    }

    pub async fn current_coin(&self, user_id: UserId) -> String {
        self.read(user_id, |session| session.current_coin().to_owned())
            .await
    }
}
