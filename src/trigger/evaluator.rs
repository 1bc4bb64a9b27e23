use crate::presentation::DisplayStyle;
use crate::trigger::types::{StyleRule, TriggerContext, TriggerDecision, TriggerFlag, TriggerReason};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_MESSAGE_INTERVAL: u64 = 10;

fn default_message_interval() -> u64 {
    DEFAULT_MESSAGE_INTERVAL
}

fn default_style_rules() -> Vec<StyleRule> {
    vec![
        StyleRule::new(TriggerFlag::ItemCompleted, DisplayStyle::Brutalist),
        StyleRule::new(TriggerFlag::ProgressMade, DisplayStyle::Terminal),
        StyleRule::new(TriggerFlag::TopicChanged, DisplayStyle::Modern),
    ]
}

fn default_reason_priority() -> Vec<TriggerFlag> {
    vec![
        TriggerFlag::UserAsked,
        TriggerFlag::ItemCompleted,
        TriggerFlag::ProgressMade,
        TriggerFlag::PartialCompleted,
        TriggerFlag::TopicChanged,
    ]
}

/// Knobs for [`TriggerEvaluator`].
///
/// Style rules and reason priority are separate lists; the first entry whose
/// flag is set wins in each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Display every N messages. 0 disables periodic display.
    #[serde(default = "default_message_interval")]
    pub message_interval: u64,

    #[serde(default = "default_style_rules")]
    pub style_rules: Vec<StyleRule>,

    #[serde(default)]
    pub default_style: DisplayStyle,

    #[serde(default = "default_reason_priority")]
    pub reason_priority: Vec<TriggerFlag>,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            message_interval: DEFAULT_MESSAGE_INTERVAL,
            style_rules: default_style_rules(),
            default_style: DisplayStyle::default(),
            reason_priority: default_reason_priority(),
        }
    }
}

impl TriggerConfig {
    pub fn with_interval(mut self, message_interval: u64) -> Self {
        self.message_interval = message_interval;
        self
    }
}

/// Decides when and how to surface the todo list
#[derive(Debug, Clone)]
pub struct TriggerEvaluator {
    config: TriggerConfig,
    message_count: u64,
}

impl TriggerEvaluator {
    pub fn new(config: TriggerConfig) -> Self {
        Self {
            config,
            message_count: 0,
        }
    }

    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    /// Messages seen so far
    pub fn message_count(&self) -> u64 {
        self.message_count
    }

    fn interval_reached(&self) -> bool {
        self.config.message_interval != 0 && self.message_count % self.config.message_interval == 0
    }

    /// Counts this message and reports whether the todo list should be shown
    pub fn should_display(&mut self, ctx: &TriggerContext) -> bool {
        self.message_count += 1;
        let fired = ctx.any() || self.interval_reached();
        debug!(
            message_count = self.message_count,
            fired, "Evaluated display trigger"
        );
        fired
    }

    pub fn select_style(&self, ctx: &TriggerContext) -> DisplayStyle {
        self.config
            .style_rules
            .iter()
            .find(|rule| ctx.is_set(rule.flag))
            .map(|rule| rule.style)
            .unwrap_or(self.config.default_style)
    }

    /// Flags missing from `reason_priority` still win over the interval,
    /// in [`TriggerFlag::ALL`] order.
    pub fn trigger_reason(&self, ctx: &TriggerContext) -> TriggerReason {
        self.config
            .reason_priority
            .iter()
            .chain(TriggerFlag::ALL.iter())
            .copied()
            .find(|flag| ctx.is_set(*flag))
            .map(TriggerReason::from_flag)
            .unwrap_or(TriggerReason::MessageInterval)
    }

    /// Counts the message and bundles the display decision with style and reason
    pub fn evaluate(&mut self, ctx: &TriggerContext) -> TriggerDecision {
        let should_display = self.should_display(ctx);
        TriggerDecision {
            should_display,
            style: self.select_style(ctx),
            reason: self.trigger_reason(ctx),
            message_count: self.message_count,
        }
    }

    /// Headline shown above a triggered display
    pub fn contextual_message(&self, ctx: &TriggerContext) -> String {
        if ctx.item_completed {
            "TASK COMPLETED! Updated progress:".to_string()
        } else if ctx.progress_made {
            "SIGNIFICANT PROGRESS! Current status:".to_string()
        } else if ctx.partial_completed {
            "PARTIAL COMPLETION! Status update:".to_string()
        } else if ctx.topic_changed {
            "TOPIC SHIFT DETECTED! Current todos:".to_string()
        } else if ctx.user_asked {
            "TODO STATUS REQUESTED:".to_string()
        } else {
            format!(
                "PERIODIC UPDATE ({} messages):",
                self.config.message_interval
            )
        }
    }
}

impl Default for TriggerEvaluator {
    fn default() -> Self {
        Self::new(TriggerConfig::default())
    }
}
