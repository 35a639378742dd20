use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

const DATA_DIR_ENV: &str = "DEVNAV_DATA_DIR";
const DEBOUNCE_ENV: &str = "DEVNAV_DEBOUNCE_MS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavConfig {
    /// Directory holding one JSON document per storage key
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Quiet window for search input coalescing
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,
}

/// 获取 devnav 配置目录 (~/.devnav)
pub fn devnav_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".devnav")
}

pub fn config_json_path() -> PathBuf {
    devnav_dir().join("config.json")
}

fn default_data_dir() -> PathBuf {
    devnav_dir()
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl NavConfig {
    /// Defaults, then `~/.devnav/config.json`, then environment overrides
    pub fn load() -> Self {
        let mut config = Self::from_file(&config_json_path()).unwrap_or_default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Read a config file; a missing or malformed file yields `None`
    pub fn from_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read config {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str::<NavConfig>(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Failed to parse config {}: {}", path.display(), e);
                None
            }
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(ms) = lookup(DEBOUNCE_ENV).and_then(|v| v.trim().parse::<u64>().ok()) {
            self.search_debounce_ms = ms;
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn debounce_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.search_debounce_ms)
    }
}
