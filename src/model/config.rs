use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// JSON file backing the task store
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Filter tokens applied at startup
    #[serde(default)]
    pub filters: Vec<String>,
    /// Write tracing output here (the TUI owns stdout)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Number of on/off toggles in the post-edit highlight
    #[serde(default = "default_blink_ticks")]
    pub blink_ticks: u8,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            colors: HashMap::new(),
            blink_ticks: default_blink_ticks(),
        }
    }
}

fn default_blink_ticks() -> u8 {
    6
}
