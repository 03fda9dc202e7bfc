pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{AppConfig, LogFormat, TomlConfig};

pub use adapters::storage::JsonFileStorage;
pub use core::{
    command::{Command, CommandResult},
    engine::EduBase,
    store::Store,
};
pub use utils::error::{EduError, Result};
