pub mod config;
pub use config::{Config, GameConfig};

pub mod data;
pub use data::{BotData, DataError};

pub mod logging;
