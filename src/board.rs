//! Caller-facing entry point tying sessions, triggers and presentation together

use crate::config::Config;
use crate::presentation::{DisplayStyle, Presentation, Presenter};
use crate::session::{ChatInit, SessionManager, SessionMetadata, SessionRecord, SessionStore};
use crate::todo::{validate_todos, TodoItem};
use crate::trigger::{TriggerContext, TriggerDecision, TriggerEvaluator, TriggerReason};
use crate::utils::{Result, TodoBoardError};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, info};

/// Output of a display that fired
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOutput {
    pub headline: String,
    pub reason: TriggerReason,
    pub style: DisplayStyle,
    pub presentation: Presentation,
    /// Headline, todo box and trigger footer, ready to print
    pub text: String,
}

/// One conversation's view of the shared session store
pub struct TodoBoard {
    manager: SessionManager,
    evaluator: TriggerEvaluator,
    presenter: Presenter,
    show_scorecard: bool,
}

impl TodoBoard {
    pub fn new(store: Arc<SessionStore>, config: &Config) -> Self {
        Self {
            manager: SessionManager::new(store),
            evaluator: TriggerEvaluator::new(config.trigger.clone()),
            presenter: Presenter::with_weights(config.score_weights),
            show_scorecard: config.show_scorecard,
        }
    }

    pub fn with_presenter(mut self, presenter: Presenter) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        self.manager.store()
    }

    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    pub fn evaluator(&self) -> &TriggerEvaluator {
        &self.evaluator
    }

    pub async fn save_session(
        &self,
        session_id: &str,
        todos: Vec<TodoItem>,
        metadata: SessionMetadata,
    ) -> Result<SessionRecord> {
        self.store().save(session_id, todos, metadata).await
    }

    pub async fn load_all_sessions(&self) -> BTreeMap<String, SessionRecord> {
        self.store().load_all().await
    }

    pub async fn switch_session(&mut self, session_id: &str) -> Result<SessionRecord> {
        self.manager.switch_to_session(session_id).await
    }

    pub async fn initialize_new_chat(&mut self) -> Option<ChatInit> {
        self.manager.initialize_new_chat().await
    }

    /// `Ok(false)` when no session is current
    pub async fn update_current_session(
        &self,
        todos: Vec<TodoItem>,
        metadata: SessionMetadata,
    ) -> Result<bool> {
        self.manager.update_current_session(todos, metadata).await
    }

    /// Like [`update_current_session`](Self::update_current_session) but
    /// reports a missing current session as `NoActiveSession`
    pub async fn update_current_or_fail(
        &self,
        todos: Vec<TodoItem>,
        metadata: SessionMetadata,
    ) -> Result<()> {
        if self.update_current_session(todos, metadata).await? {
            Ok(())
        } else {
            Err(TodoBoardError::NoActiveSession)
        }
    }

    pub fn evaluate_trigger(&mut self, ctx: &TriggerContext) -> TriggerDecision {
        self.evaluator.evaluate(ctx)
    }

    pub fn present(&self, todos: &[TodoItem], style: DisplayStyle) -> Presentation {
        self.presenter.present(todos, style, self.show_scorecard)
    }

    /// Evaluates the trigger for this message and, when it fires, renders the
    /// list and stores it as the current session's todos.
    ///
    /// Invalid todos are rejected before the message is counted, whether or
    /// not a session is current.
    pub async fn display_if_triggered(
        &mut self,
        session_id: &str,
        todos: Vec<TodoItem>,
        ctx: &TriggerContext,
    ) -> Result<Option<DisplayOutput>> {
        validate_todos(&todos)?;

        let decision = self.evaluator.evaluate(ctx);
        if !decision.should_display {
            debug!(
                session_id = %session_id,
                message_count = decision.message_count,
                "Display not triggered"
            );
            return Ok(None);
        }

        let presentation = self.present(&todos, decision.style);
        let updated = self
            .manager
            .update_current_session(todos, SessionMetadata::new())
            .await?;
        if !updated {
            debug!(session_id = %session_id, "No current session, display not stored");
        }

        let headline = self.evaluator.contextual_message(ctx);
        let text = format!(
            "{}\n\n{}\n\nTrigger: {}\nStyle: {}\nAchievement: {}",
            headline,
            presentation.display,
            decision.reason.label(),
            decision.style.to_string().to_uppercase(),
            presentation.tier
        );

        info!(
            session_id = %session_id,
            reason = %decision.reason,
            style = %decision.style,
            "Todo display triggered"
        );

        Ok(Some(DisplayOutput {
            headline,
            reason: decision.reason,
            style: decision.style,
            presentation,
            text,
        }))
    }

    /// Text shown when a new chat starts
    pub fn resume_message(&self, init: &ChatInit) -> String {
        match init {
            ChatInit::NoActiveTodos => {
                "No active todos found. Ready to create a new session!".to_string()
            }
            ChatInit::Resumed { current, others, .. } => {
                let presentation = self.present(&current.todos, DisplayStyle::Minimalist);
                let mut message = format!(
                    "CONTINUING FROM PREVIOUS CHAT\n\nMost recent active session: {}\n\n{}",
                    current.display_name(),
                    presentation.display
                );

                if !others.is_empty() {
                    let _ = write!(message, "\n\nOTHER ACTIVE SESSIONS ({}):\n", others.len());
                    for overview in SessionManager::session_overview(others) {
                        let _ = writeln!(
                            message,
                            "• {} - {} ({})",
                            overview.title, overview.progress, overview.last_worked
                        );
                    }
                    let _ = write!(
                        message,
                        "\nWould you like to switch to a different session, \
                         or continue with \"{}\"?",
                        current.display_name()
                    );
                }
                message
            }
        }
    }

    /// Text shown after switching sessions
    pub fn switch_message(&self, record: &SessionRecord) -> String {
        let presentation = self.present(&record.todos, DisplayStyle::Modern);
        format!(
            "SWITCHED TO SESSION: {}\n\n{}",
            record.display_name(),
            presentation.display
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::{Priority, TodoStatus};
    use crate::trigger::{TriggerConfig, TriggerFlag};
    use chrono::{TimeZone, Utc};

    fn todos(statuses: &[TodoStatus]) -> Vec<TodoItem> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, s)| TodoItem::new(format!("Implement step {}", i + 1), *s, Priority::High))
            .collect()
    }

    fn board() -> TodoBoard {
        TodoBoard::new(Arc::new(SessionStore::new()), &Config::default())
    }

    #[tokio::test]
    async fn test_display_not_triggered() {
        let mut board = board();
        let output = board
            .display_if_triggered("a", todos(&[TodoStatus::Pending]), &TriggerContext::new())
            .await
            .unwrap();
        assert!(output.is_none());
        assert_eq!(board.evaluator().message_count(), 1);
    }

    #[tokio::test]
    async fn test_display_updates_current_session() {
        let mut board = board();
        board
            .save_session("a", todos(&[TodoStatus::Pending]), SessionMetadata::new())
            .await
            .unwrap();
        board.switch_session("a").await.unwrap();

        let ctx = TriggerContext::item_completed().with(TriggerFlag::ProgressMade);
        let output = board
            .display_if_triggered("a", todos(&[TodoStatus::Completed]), &ctx)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(output.style, DisplayStyle::Brutalist);
        assert_eq!(output.reason, TriggerReason::Completion);
        assert!(output.text.contains("Trigger: COMPLETION"));
        assert!(output.text.contains("Style: BRUTALIST"));
        assert!(output.text.starts_with("TASK COMPLETED!"));

        let stored = board.store().get("a").await.unwrap();
        assert_eq!(stored.todos[0].status, TodoStatus::Completed);
    }

    #[tokio::test]
    async fn test_periodic_display_without_current_session() {
        let config = Config {
            trigger: TriggerConfig::default().with_interval(2),
            ..Config::default()
        };
        let mut board = TodoBoard::new(Arc::new(SessionStore::new()), &config);

        let idle = TriggerContext::new();
        assert!(board.display_if_triggered("a", vec![], &idle).await.unwrap().is_none());
        let output = board
            .display_if_triggered("a", todos(&[TodoStatus::Pending]), &idle)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(output.reason, TriggerReason::MessageInterval);
        assert!(output.headline.contains("PERIODIC"));
        assert!(board.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_display_rejects_blank_todo_without_current_session() {
        let mut board = board();
        let blank = vec![TodoItem::new("   ", TodoStatus::Pending, Priority::Low)];

        let err = board
            .display_if_triggered("a", blank, &TriggerContext::user_asked())
            .await
            .unwrap_err();

        assert!(matches!(err, TodoBoardError::InvalidInput { .. }));
        assert_eq!(board.evaluator().message_count(), 0);
        assert!(board.store().is_empty().await);
    }

    #[test]
    fn test_evaluate_trigger_fires_on_tenth_idle_message() {
        let mut board = board();
        let idle = TriggerContext::new();

        let decisions: Vec<TriggerDecision> =
            (0..10).map(|_| board.evaluate_trigger(&idle)).collect();

        assert!(decisions[..9].iter().all(|d| !d.should_display));
        assert!(decisions[9].should_display);
        assert_eq!(decisions[9].reason, TriggerReason::MessageInterval);
        assert_eq!(decisions[9].message_count, 10);
    }

    #[tokio::test]
    async fn test_load_all_sessions_returns_a_copy() {
        let board = board();
        board
            .save_session("a", todos(&[TodoStatus::Pending]), SessionMetadata::new())
            .await
            .unwrap();

        let mut sessions = board.load_all_sessions().await;
        sessions.get_mut("a").unwrap().todos.clear();
        sessions.remove("a");

        let stored = board.load_all_sessions().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored["a"].todos.len(), 1);
    }

    #[tokio::test]
    async fn test_custom_presenter_is_used() {
        use crate::presentation::{Evaluation, Scorer};

        struct PerfectScorer;

        impl Scorer for PerfectScorer {
            fn score(&self, _display: &str, _todos: &[TodoItem]) -> Evaluation {
                Evaluation {
                    design: 10.0,
                    usability: 10.0,
                    creativity: 10.0,
                    content: 10.0,
                    overall: 10.0,
                }
            }

            fn name(&self) -> &'static str {
                "perfect"
            }
        }

        let board = board().with_presenter(Presenter::new(Box::new(PerfectScorer)));
        let presentation = board.present(&todos(&[TodoStatus::Pending]), DisplayStyle::Modern);
        assert_eq!(presentation.evaluation.overall, 10.0);
    }

    #[tokio::test]
    async fn test_update_current_or_fail() {
        let board = board();
        let err = board
            .update_current_or_fail(todos(&[TodoStatus::Pending]), SessionMetadata::new())
            .await
            .unwrap_err();
        assert!(matches!(err, TodoBoardError::NoActiveSession));
    }

    #[tokio::test]
    async fn test_resume_message_lists_other_sessions() {
        let mut board = board();
        let at = |h| Utc.with_ymd_and_hms(2025, 7, 6, h, 0, 0).unwrap();
        board
            .save_session(
                "design",
                todos(&[TodoStatus::Pending]),
                SessionMetadata::new()
                    .with_title("Design System Project")
                    .with_last_worked_on(at(10)),
            )
            .await
            .unwrap();
        board
            .save_session(
                "api",
                todos(&[TodoStatus::Completed, TodoStatus::InProgress]),
                SessionMetadata::new()
                    .with_title("API Refactor Sprint")
                    .with_last_worked_on(at(9)),
            )
            .await
            .unwrap();

        let init = board.initialize_new_chat().await.unwrap();
        let message = board.resume_message(&init);

        assert!(message.contains("Most recent active session: Design System Project"));
        assert!(message.contains("OTHER ACTIVE SESSIONS (1):"));
        assert!(message.contains(
            "• API Refactor Sprint - 1/2 complete, 1 in progress (2025-07-06)"
        ));
        assert!(message.contains("continue with \"Design System Project\""));
    }

    #[tokio::test]
    async fn test_resume_message_when_nothing_active() {
        let mut board = board();
        let init = board.initialize_new_chat().await.unwrap();
        assert!(board.resume_message(&init).starts_with("No active todos"));
    }

    #[tokio::test]
    async fn test_switch_message_uses_modern_style() {
        let mut board = board();
        board
            .save_session("api", todos(&[TodoStatus::Pending]), SessionMetadata::new())
            .await
            .unwrap();
        let record = board.switch_session("api").await.unwrap();
        let message = board.switch_message(&record);

        assert!(message.starts_with("SWITCHED TO SESSION: api"));
        assert!(message.contains('▫'));
    }
}
