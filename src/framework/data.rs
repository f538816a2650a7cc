use chrono::Utc;
use tracing::{info, warn};

use crate::{game::SessionStore, UtcDateTime};

use super::Config;

pub mod error;
pub use error::Error as DataError;

pub type Result<T, E = DataError> = std::result::Result<T, E>;

const CONFIG_VAR: &str = "RIDDLEBOT_TOML";
const DEFAULT_CONFIG_PATH: &str = "./riddlebot.toml";

/// Everything the command layer needs, built once at startup.
#[derive(Debug, Clone)]
pub struct BotData {
    config: Config,
    sessions: SessionStore,
    started: UtcDateTime,
}

impl BotData {
    pub fn new() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::load(&config_path(std::env::var(CONFIG_VAR).ok()))
    }

    pub fn load(config_file: &str) -> Result<Self> {
        let config = Config::load(config_file)?;
        info!("config loaded");

        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        let sessions = SessionStore::with_config(config.game.clone());

        Self {
            config,
            sessions,
            started: Utc::now(),
        }
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub const fn started(&self) -> UtcDateTime {
        self.started
    }
}

fn config_path(var: Option<String>) -> String {
    if let Some(path) = var {
        info!(path, "looking for config file with {CONFIG_VAR}...");
        path
    } else {
        let path = DEFAULT_CONFIG_PATH.to_owned();
        warn!(path, "{CONFIG_VAR} env unset, using default path");
        path
    }
}
