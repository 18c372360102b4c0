//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::servo::ServoConfig;

/// Maximum number of servos in one configuration.
pub const MAX_SERVOS: usize = 8;

/// Topic prefix used by the original servo node.
pub const DEFAULT_TOPIC_PREFIX: &str = "/nodes/arduino/servo/";

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Named servo configurations, indexed in declaration order.
    pub servos: FnvIndexMap<String<32>, ServoConfig, MAX_SERVOS>,

    /// Command protocol settings.
    #[serde(default)]
    pub protocol: ProtocolConfig,
}

/// Command protocol settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ProtocolConfig {
    /// Prefix shared by every servo topic; the servo index follows it.
    #[serde(default = "default_topic_prefix")]
    pub topic_prefix: String<64>,
}

fn default_topic_prefix() -> String<64> {
    String::try_from(DEFAULT_TOPIC_PREFIX).unwrap_or_default()
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            topic_prefix: default_topic_prefix(),
        }
    }
}

impl SystemConfig {
    /// Get a servo configuration by key.
    pub fn servo(&self, name: &str) -> Option<&ServoConfig> {
        self.servos
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Index a servo will occupy in a bank built from this configuration.
    pub fn servo_index(&self, name: &str) -> Option<usize> {
        self.servos.keys().position(|k| k.as_str() == name)
    }

    /// List all servo keys in declaration order.
    pub fn servo_names(&self) -> impl Iterator<Item = &str> {
        self.servos.keys().map(|s| s.as_str())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            servos: FnvIndexMap::new(),
            protocol: ProtocolConfig::default(),
        }
    }
}
