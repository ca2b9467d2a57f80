pub mod config;

pub use config::ConfigStorage;

use std::path::PathBuf;

pub fn get_config_dir() -> crate::Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("tracker"))
        .ok_or_else(|| crate::Error::NotFound("Could not find config directory".to_string()))
}
