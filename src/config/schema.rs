use crate::presentation::ScoreWeights;
use crate::trigger::TriggerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_show_scorecard() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub trigger: TriggerConfig,

    #[serde(default)]
    pub score_weights: ScoreWeights,

    #[serde(default = "default_show_scorecard")]
    pub show_scorecard: bool,

    /// Where the session snapshot lives. Without one the store is memory-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trigger: TriggerConfig::default(),
            score_weights: ScoreWeights::default(),
            show_scorecard: true,
            snapshot_path: None,
        }
    }
}

/// Loggable view of the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSummary {
    pub message_interval: u64,
    pub style_rule_count: usize,
    pub show_scorecard: bool,
    pub snapshot_configured: bool,
}

impl Config {
    pub fn get_summary(&self) -> ConfigSummary {
        ConfigSummary {
            message_interval: self.trigger.message_interval,
            style_rule_count: self.trigger.style_rules.len(),
            show_scorecard: self.show_scorecard,
            snapshot_configured: self.snapshot_path.is_some(),
        }
    }
}
