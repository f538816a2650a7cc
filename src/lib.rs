#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

//! Per-user session tracking for the coin riddle game.
//!
//! The bot's command layer owns a [`SessionStore`] (usually through
//! [`framework::data::BotData`]) and calls into it by [`UserId`].

/// Sessions, their states and the store that owns them.
pub mod game;
pub use game::{Attempt, Cooldown, GameState, Session, SessionStore, StartGame, UserId};

pub mod framework;
pub use framework::DataError as Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type UtcDateTime = chrono::DateTime<chrono::Utc>;
