use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::store::json_store::JsonStore;

const MIN_TICK_MS: u64 = 100;
const MAX_TICK_MS: u64 = 5_000;
const MAX_TOAST_SECS: u64 = 60;
const MAX_LEVEL_WINDOW: u32 = 500;
const MAX_FEED_LIMIT: usize = 500;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,
    #[serde(default = "default_result_toast_secs")]
    pub result_toast_secs: u64,
    #[serde(default = "default_level_window")]
    pub level_window: u32,
    #[serde(default = "default_feed_limit")]
    pub feed_limit: usize,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_data_dir() -> String {
    JsonStore::default_dir().to_string_lossy().to_string()
}
fn default_tick_ms() -> u64 {
    1000
}
fn default_toast_secs() -> u64 {
    3
}
fn default_result_toast_secs() -> u64 {
    5
}
fn default_level_window() -> u32 {
    10
}
fn default_feed_limit() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            data_dir: default_data_dir(),
            tick_ms: default_tick_ms(),
            toast_secs: default_toast_secs(),
            result_toast_secs: default_result_toast_secs(),
            level_window: default_level_window(),
            feed_limit: default_feed_limit(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("thundertype")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Clamp hand-edited values back into a usable range.
    pub fn validate(&mut self) {
        self.tick_ms = self.tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS);
        self.toast_secs = self.toast_secs.clamp(1, MAX_TOAST_SECS);
        self.result_toast_secs = self.result_toast_secs.clamp(1, MAX_TOAST_SECS);
        self.level_window = self.level_window.min(MAX_LEVEL_WINDOW);
        self.feed_limit = self.feed_limit.clamp(1, MAX_FEED_LIMIT);
        if self.theme.trim().is_empty() {
            self.theme = default_theme();
        }
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }
}
