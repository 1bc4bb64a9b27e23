use crate::presentation::DisplayStyle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Context flags describing what just happened in the conversation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerContext {
    pub user_asked: bool,
    pub item_completed: bool,
    pub progress_made: bool,
    pub partial_completed: bool,
    pub topic_changed: bool,
}

impl TriggerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_asked() -> Self {
        Self {
            user_asked: true,
            ..Self::default()
        }
    }

    pub fn item_completed() -> Self {
        Self {
            item_completed: true,
            ..Self::default()
        }
    }

    pub fn progress_made() -> Self {
        Self {
            progress_made: true,
            ..Self::default()
        }
    }

    pub fn partial_completed() -> Self {
        Self {
            partial_completed: true,
            ..Self::default()
        }
    }

    pub fn topic_changed() -> Self {
        Self {
            topic_changed: true,
            ..Self::default()
        }
    }

    pub fn with(mut self, flag: TriggerFlag) -> Self {
        match flag {
            TriggerFlag::UserAsked => self.user_asked = true,
            TriggerFlag::ItemCompleted => self.item_completed = true,
            TriggerFlag::ProgressMade => self.progress_made = true,
            TriggerFlag::PartialCompleted => self.partial_completed = true,
            TriggerFlag::TopicChanged => self.topic_changed = true,
        }
        self
    }

    pub fn is_set(&self, flag: TriggerFlag) -> bool {
        match flag {
            TriggerFlag::UserAsked => self.user_asked,
            TriggerFlag::ItemCompleted => self.item_completed,
            TriggerFlag::ProgressMade => self.progress_made,
            TriggerFlag::PartialCompleted => self.partial_completed,
            TriggerFlag::TopicChanged => self.topic_changed,
        }
    }

    pub fn any(&self) -> bool {
        TriggerFlag::ALL.iter().any(|flag| self.is_set(*flag))
    }
}

/// One context flag, used to express configurable priority orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerFlag {
    UserAsked,
    ItemCompleted,
    ProgressMade,
    PartialCompleted,
    TopicChanged,
}

impl TriggerFlag {
    pub const ALL: [TriggerFlag; 5] = [
        TriggerFlag::UserAsked,
        TriggerFlag::ItemCompleted,
        TriggerFlag::ProgressMade,
        TriggerFlag::PartialCompleted,
        TriggerFlag::TopicChanged,
    ];
}

/// Why a display fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerReason {
    UserRequest,
    Completion,
    Progress,
    Partial,
    TopicShift,
    MessageInterval,
}

impl TriggerReason {
    pub fn from_flag(flag: TriggerFlag) -> Self {
        match flag {
            TriggerFlag::UserAsked => TriggerReason::UserRequest,
            TriggerFlag::ItemCompleted => TriggerReason::Completion,
            TriggerFlag::ProgressMade => TriggerReason::Progress,
            TriggerFlag::PartialCompleted => TriggerReason::Partial,
            TriggerFlag::TopicChanged => TriggerReason::TopicShift,
        }
    }

    /// Upper-case label, e.g. "TOPIC SHIFT"
    pub fn label(self) -> String {
        self.to_string().replace('_', " ").to_uppercase()
    }
}

impl fmt::Display for TriggerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerReason::UserRequest => write!(f, "user_request"),
            TriggerReason::Completion => write!(f, "completion"),
            TriggerReason::Progress => write!(f, "progress"),
            TriggerReason::Partial => write!(f, "partial"),
            TriggerReason::TopicShift => write!(f, "topic_shift"),
            TriggerReason::MessageInterval => write!(f, "message_interval"),
        }
    }
}

/// Style to use when `flag` is set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRule {
    pub flag: TriggerFlag,
    pub style: DisplayStyle,
}

impl StyleRule {
    pub fn new(flag: TriggerFlag, style: DisplayStyle) -> Self {
        Self { flag, style }
    }
}

/// Result of evaluating one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerDecision {
    pub should_display: bool,
    pub style: DisplayStyle,
    pub reason: TriggerReason,
    pub message_count: u64,
}
