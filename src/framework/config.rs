use serde::Deserialize;

#[derive(Debug, thiserror::Error, thisslime::TracingError)]
pub enum Error {
    #[error("config file could not be loaded: {0}")]
    #[event(level = ERROR)]
    Read(::config::ConfigError),

    #[error("configuration could not be parsed: {0}")]
    #[event(level = ERROR)]
    Parse(::config::ConfigError),
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
}

impl Config {
    #[tracing::instrument(name = "config")]
    pub fn load(path: &str) -> Result<Self, Error> {
        Self::from_builder(
            ::config::Config::builder()
                .add_source(::config::File::new(path, ::config::FileFormat::Toml)),
        )
    }

    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Self::from_builder(
            ::config::Config::builder()
                .add_source(::config::File::from_str(text, ::config::FileFormat::Toml)),
        )
    }

    fn from_builder(
        builder: ::config::ConfigBuilder<::config::builder::DefaultState>,
    ) -> Result<Self, Error> {
        builder
            .build()
            .map_err(Error::Read)?
            .try_deserialize()
            .map_err(Error::Parse)
    }
}

/// Per-game limits.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    attempts: i32,
    hints: u32,
    cooldown: i64,
}

impl GameConfig {
    pub const DEFAULT_ATTEMPTS: i32 = 3;
    pub const DEFAULT_HINTS: u32 = 3;
    pub const DEFAULT_COOLDOWN: i64 = 300;

    pub const fn new(attempts: i32, hints: u32, cooldown: i64) -> Self {
        Self {
            attempts,
            hints,
            cooldown,
        }
    }

    /// Attempts a fresh game starts with.
    pub const fn attempts(&self) -> i32 {
        self.attempts
    }

    /// Hints per game before `add_hint` starts returning `false`.
    pub const fn hints(&self) -> u32 {
        self.hints
    }

    /// Default cooldown length in seconds.
    pub const fn cooldown(&self) -> i64 {
        self.cooldown
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_ATTEMPTS,
            Self::DEFAULT_HINTS,
            Self::DEFAULT_COOLDOWN,
        )
    }
}
