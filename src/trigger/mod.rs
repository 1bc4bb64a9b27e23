pub mod evaluator;
pub mod types;

pub use evaluator::{TriggerConfig, TriggerEvaluator, DEFAULT_MESSAGE_INTERVAL};
pub use types::{StyleRule, TriggerContext, TriggerDecision, TriggerFlag, TriggerReason};
