//! Bordered rendering and scoring of todo lists

pub mod render;
pub mod score;
pub mod style;

pub use render::render_todos;
pub use score::{scorecard, AwardTier, Evaluation, HeuristicScorer, ScoreWeights, Scorer};
pub use style::DisplayStyle;

use crate::todo::TodoItem;

/// A rendered, scored todo list
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub style: DisplayStyle,
    /// Todo box, followed by the scorecard when requested
    pub display: String,
    pub evaluation: Evaluation,
    pub tier: AwardTier,
}

pub struct Presenter {
    scorer: Box<dyn Scorer>,
}

impl Presenter {
    pub fn new(scorer: Box<dyn Scorer>) -> Self {
        Self { scorer }
    }

    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self::new(Box::new(HeuristicScorer::new(weights)))
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    pub fn present(
        &self,
        todos: &[TodoItem],
        style: DisplayStyle,
        show_scorecard: bool,
    ) -> Presentation {
        let mut display = render_todos(todos, style);
        let evaluation = self.scorer.score(&display, todos);
        tracing::debug!(
            style = %style,
            scorer = self.scorer.name(),
            overall = evaluation.overall,
            "Scored todo display"
        );

        if show_scorecard {
            display.push_str("\n\n");
            display.push_str(&scorecard(&evaluation));
        }

        Presentation {
            style,
            display,
            evaluation,
            tier: evaluation.tier(),
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(Box::new(HeuristicScorer::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::{Priority, TodoStatus};

    struct FixedScorer;

    impl Scorer for FixedScorer {
        fn score(&self, _display: &str, _todos: &[TodoItem]) -> Evaluation {
            Evaluation {
                design: 5.0,
                usability: 5.0,
                creativity: 5.0,
                content: 5.0,
                overall: 5.0,
            }
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_present_with_scorecard() {
        let todos = vec![TodoItem::new(
            "Plan content calendar",
            TodoStatus::Pending,
            Priority::Low,
        )];
        let presentation = Presenter::default().present(&todos, DisplayStyle::Minimalist, true);

        assert!(presentation.display.contains("Plan content calendar"));
        assert!(presentation.display.contains("OVERALL:"));
        assert_eq!(presentation.tier, presentation.evaluation.tier());
    }

    #[test]
    fn test_present_without_scorecard() {
        let todos = vec![TodoItem::new(
            "Plan content calendar",
            TodoStatus::Pending,
            Priority::Low,
        )];
        let presentation = Presenter::default().present(&todos, DisplayStyle::Modern, false);
        assert!(!presentation.display.contains("OVERALL:"));
        assert_eq!(presentation.display.lines().count(), 3);
    }

    #[test]
    fn test_scorer_is_swappable() {
        let presenter = Presenter::new(Box::new(FixedScorer));
        let presentation = presenter.present(&[], DisplayStyle::Terminal, false);

        assert_eq!(presenter.scorer_name(), "fixed");
        assert_eq!(presentation.tier, AwardTier::KeepImproving);
    }
}
