// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE_URL: &str = "sqlite:CurrencyExchange.db";
pub const CONFIG_FILE: &str = "currency-exchange.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub seed_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 1,
            seed_file: None,
        }
    }
}

impl Config {
    /// Load `currency-exchange.toml` from the working directory when present,
    /// then let `DATABASE_URL` (from the environment or `.env`) override it.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let path = PathBuf::from(CONFIG_FILE);
        let mut config = if path.exists() {
            load_config(&path)?
        } else {
            Self::default()
        };

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = url;
        }

        Ok(config)
    }
}

pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &Config) -> anyhow::Result<()> {
    let config_str = toml::to_string_pretty(config)?;
    fs::write(path, config_str)?;
    Ok(())
}
