use std::fmt::Display;

use crate::UtcDateTime;

use super::clock::offset;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    NotStarted,
    InProgress,
    Cooldown,
    WaitingForWallet,
}

impl Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Cooldown => "cooldown",
            Self::WaitingForWallet => "waiting for wallet",
        })
    }
}

/// Outcome of [`SessionStore::start_game`](super::SessionStore::start_game).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartGame {
    Started,
    OnCooldown { remaining: i64 },
}

impl StartGame {
    pub const fn started(&self) -> bool {
        matches!(self, Self::Started)
    }

    /// Whole seconds left on the blocking cooldown, or 0 if the game started.
    pub const fn remaining(&self) -> i64 {
        match self {
            Self::Started => 0,
            Self::OnCooldown { remaining } => *remaining,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    pub left: i32,
}

impl Attempt {
    pub const fn has_remaining(&self) -> bool {
        self.left > 0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cooldown {
    Inactive,
    Active { remaining: i64 },
}

impl Cooldown {
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub const fn remaining(&self) -> i64 {
        match self {
            Self::Inactive => 0,
            Self::Active { remaining } => *remaining,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    user_id: UserId,
    state: GameState,
    cooldown_until: Option<UtcDateTime>,
    hint_count: u32,
    attempts_left: i32,
    current_coin: String,
    last_hint: String,
}

impl Session {
    pub fn new(user_id: UserId, attempts: i32) -> Self {
        Self {
            user_id,
            state: GameState::NotStarted,
            cooldown_until: None,
            hint_count: 0,
            attempts_left: attempts,
            current_coin: String::new(),
            last_hint: String::new(),
        }
    }

    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Only meaningful while [`state`](Self::state) is [`GameState::Cooldown`].
    pub const fn cooldown_until(&self) -> Option<UtcDateTime> {
        self.cooldown_until
    }

    pub const fn hint_count(&self) -> u32 {
        self.hint_count
    }

    pub const fn attempts_left(&self) -> i32 {
        self.attempts_left
    }

    pub fn current_coin(&self) -> &str {
        &self.current_coin
    }

    pub fn last_hint(&self) -> &str {
        &self.last_hint
    }

    pub fn is_waiting_for_wallet(&self) -> bool {
        self.state == GameState::WaitingForWallet
    }

    /// Whole seconds until the cooldown ends, truncated toward zero.
    /// `None` unless the session is in cooldown.
    fn cooldown_remaining(&self, now: UtcDateTime) -> Option<i64> {
        if self.state != GameState::Cooldown {
            return None;
        }

        // a cooldown with no end time is already over
        let until = self.cooldown_until.unwrap_or(now);
        Some(until.signed_duration_since(now).num_seconds())
    }

    pub(super) fn start(&mut self, now: UtcDateTime, attempts: i32) -> StartGame {
        if self.state == GameState::Cooldown {
            if let Some(until) = self.cooldown_until.filter(|until| now < *until) {
                return StartGame::OnCooldown {
                    remaining: until.signed_duration_since(now).num_seconds(),
                };
            }
        }

        self.state = GameState::InProgress;
        self.hint_count = 0;
        self.attempts_left = attempts;
        self.cooldown_until = None;
        self.current_coin.clear();
        self.last_hint.clear();

        StartGame::Started
    }

    pub(super) fn use_attempt(&mut self) -> Attempt {
        self.attempts_left = self.attempts_left.saturating_sub(1);

        Attempt {
            left: self.attempts_left,
        }
    }

    /// `None` without changing anything unless a game is in progress,
    /// otherwise whether the hint is within `max_hints`. Past the limit the
    /// hint is still recorded.
    pub(super) fn add_hint(&mut self, riddle: String, max_hints: u32) -> Option<bool> {
        if self.state != GameState::InProgress {
            return None;
        }

        self.hint_count = self.hint_count.saturating_add(1);
        self.last_hint = riddle;

        Some(self.hint_count <= max_hints)
    }

    pub(super) fn set_cooldown(&mut self, now: UtcDateTime, duration_secs: i64) {
        self.state = GameState::Cooldown;
        self.cooldown_until = Some(offset(now, duration_secs));
    }

    pub(super) fn check_cooldown(&mut self, now: UtcDateTime) -> Cooldown {
        match self.cooldown_remaining(now) {
            Some(remaining) if remaining > 0 => Cooldown::Active { remaining },
            Some(_) => {
                self.state = GameState::NotStarted;
                Cooldown::Inactive
            }
            None => Cooldown::Inactive,
        }
    }

    pub(super) fn set_waiting_for_wallet(&mut self) {
        self.state = GameState::WaitingForWallet;
    }

    pub(super) fn set_current_coin(&mut self, coin: String) {
        self.current_coin = coin;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, Utc};
    use pretty_assertions::assert_eq;

    use super::{Cooldown, GameState, Session, StartGame, UserId};

    fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    #[test]
    fn new_session_defaults() {
        let session = Session::new(UserId(7), 3);

        assert_eq!(session.user_id(), UserId(7));
        assert_eq!(session.state(), GameState::NotStarted);
        assert_eq!(session.cooldown_until(), None);
        assert_eq!(session.hint_count(), 0);
        assert_eq!(session.attempts_left(), 3);
        assert_eq!(session.current_coin(), "");
        assert_eq!(session.last_hint(), "");
    }

    #[test]
    fn start_truncates_sub_second_remainder() {
        let mut session = Session::new(UserId(1), 3);
        session.set_cooldown(epoch(), 10);

        // 9.5 seconds left
        let now = epoch() + TimeDelta::milliseconds(500);
        assert_eq!(session.start(now, 3), StartGame::OnCooldown { remaining: 9 });

        // less than a second left still blocks, with 0 remaining
        let now = epoch() + TimeDelta::milliseconds(9_900);
        assert_eq!(session.start(now, 3), StartGame::OnCooldown { remaining: 0 });
        assert_eq!(session.state(), GameState::Cooldown);
    }

    #[test]
    fn start_after_expiry_without_check() {
        let mut session = Session::new(UserId(1), 3);
        session.set_cooldown(epoch(), 10);

        let now = epoch() + TimeDelta::seconds(10);
        assert_eq!(session.start(now, 3), StartGame::Started);
        assert_eq!(session.state(), GameState::InProgress);
        assert_eq!(session.cooldown_until(), None);
    }

    #[test]
    fn negative_cooldown_is_already_expired() {
        let mut session = Session::new(UserId(1), 3);
        session.set_cooldown(epoch(), -30);

        assert_eq!(session.state(), GameState::Cooldown);
        assert_eq!(session.check_cooldown(epoch()), Cooldown::Inactive);
        assert_eq!(session.state(), GameState::NotStarted);
    }

    #[test]
    fn check_cooldown_outside_cooldown_keeps_state() {
        let mut session = Session::new(UserId(1), 3);
        session.start(epoch(), 3);

        assert_eq!(session.check_cooldown(epoch()), Cooldown::Inactive);
        assert_eq!(session.state(), GameState::InProgress);
    }

    #[test]
    fn attempts_go_negative() {
        let mut session = Session::new(UserId(1), 1);

        assert_eq!(session.use_attempt().left, 0);
        assert_eq!(session.use_attempt().left, -1);
        assert!(!session.use_attempt().has_remaining());
    }

    #[test]
    fn hint_limit_is_configurable() {
        let mut session = Session::new(UserId(1), 3);
        session.start(epoch(), 3);

        assert_eq!(session.add_hint("first".to_owned(), 1), Some(true));
        assert_eq!(session.add_hint("second".to_owned(), 1), Some(false));
        assert_eq!(session.last_hint(), "second");
    }

    #[test]
    fn hint_outside_game_is_none() {
        let mut session = Session::new(UserId(1), 3);

        assert_eq!(session.add_hint("early".to_owned(), 3), None);
        assert_eq!(session.hint_count(), 0);
        assert_eq!(session.last_hint(), "");
    }
}
