use serde::{Deserialize, Serialize};
use std::{collections::HashMap, time::Duration};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RootConfig {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub progress: ProgressConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub panel: PanelConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            // spider plus active scan can take a few minutes server side
            timeout_ms: 180_000,
            headers: HashMap::new(),
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ProgressConfig {
    pub interval_ms: u64,
    pub min_step: u8,
    pub max_step: u8,
    pub cap: u8,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            interval_ms: 600,
            min_step: 3,
            max_step: 10,
            cap: 95,
        }
    }
}

impl ProgressConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ChatConfig {
    pub include_scan: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PanelConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 380,
            height: 520,
        }
    }
}
