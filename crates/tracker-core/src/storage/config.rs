//! Configuration storage operations

use crate::{models::Config, Error, Result};
use std::path::PathBuf;

const CONFIG_FILE: &str = "config.json";

pub struct ConfigStorage {
    config_dir: PathBuf,
}

impl ConfigStorage {
    pub fn new(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn load(&self) -> Result<Config> {
        let config_path = self.path();

        if !config_path.exists() {
            return Err(Error::NotFound(format!(
                "No configuration at {}",
                config_path.display()
            )));
        }

        let content = std::fs::read_to_string(&config_path)?;
        if content.trim().is_empty() {
            return Err(Error::Validation(format!(
                "Configuration file {} is empty",
                config_path.display()
            )));
        }

        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        std::fs::create_dir_all(&self.config_dir)?;

        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(self.path(), content)?;

        Ok(())
    }
}
