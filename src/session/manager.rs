use crate::session::store::SessionStore;
use crate::session::types::{SessionMetadata, SessionOverview, SessionRecord};
use crate::todo::TodoItem;
use crate::utils::{Result, TodoBoardError};
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Whether this conversation has already looked for a session to resume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatInitState {
    NotInitialized,
    Initialized,
}

/// Outcome of the first `initialize_new_chat` call
#[derive(Debug, Clone, PartialEq)]
pub enum ChatInit {
    /// Nothing left to resume
    NoActiveTodos,
    /// The most recent incomplete session became current
    Resumed {
        current: SessionRecord,
        /// Other incomplete sessions, most recent first
        others: Vec<SessionRecord>,
        session_count: usize,
    },
}

/// Most recently worked on first; equal timestamps fall back to id order
fn by_recency(a: &SessionRecord, b: &SessionRecord) -> Ordering {
    b.last_worked_on
        .cmp(&a.last_worked_on)
        .then_with(|| a.id.cmp(&b.id))
}

/// Per-conversation view over a shared [`SessionStore`]: tracks the current
/// session and the one-shot chat initialization.
pub struct SessionManager {
    store: Arc<SessionStore>,
    current_session_id: Option<String>,
    init_state: ChatInitState,
}

impl SessionManager {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            current_session_id: None,
            init_state: ChatInitState::NotInitialized,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn current_session_id(&self) -> Option<&str> {
        self.current_session_id.as_deref()
    }

    pub fn init_state(&self) -> ChatInitState {
        self.init_state
    }

    /// Sessions with at least one pending or in-progress todo
    pub async fn incomplete_sessions(&self) -> BTreeMap<String, SessionRecord> {
        let mut sessions = self.store.load_all().await;
        sessions.retain(|_, record| record.is_incomplete());
        sessions
    }

    /// Incomplete session with the latest `last_worked_on`.
    ///
    /// Ties go to the lexicographically smallest id.
    pub async fn most_recent_incomplete(&self) -> Option<SessionRecord> {
        self.incomplete_sessions()
            .await
            .into_values()
            .min_by(by_recency)
    }

    /// Picks up where the previous chat left off.
    ///
    /// Only the first call on a manager does anything; later calls return
    /// `None` whatever the store contains.
    pub async fn initialize_new_chat(&mut self) -> Option<ChatInit> {
        if self.init_state == ChatInitState::Initialized {
            debug!("Chat already initialized, skipping");
            return None;
        }
        self.init_state = ChatInitState::Initialized;

        let mut incomplete: Vec<SessionRecord> =
            self.incomplete_sessions().await.into_values().collect();
        if incomplete.is_empty() {
            info!("No incomplete sessions to resume");
            return Some(ChatInit::NoActiveTodos);
        }

        incomplete.sort_by(by_recency);
        let session_count = incomplete.len();
        let current = incomplete.remove(0);
        self.current_session_id = Some(current.id.clone());

        info!(
            session_id = %current.id,
            other_sessions = incomplete.len(),
            "Resumed most recent incomplete session"
        );

        Some(ChatInit::Resumed {
            current,
            others: incomplete,
            session_count,
        })
    }

    /// Makes `session_id` current and bumps its `last_worked_on`.
    ///
    /// Unknown ids fail with `SessionNotFound` and leave the store untouched.
    pub async fn switch_to_session(&mut self, session_id: &str) -> Result<SessionRecord> {
        let Some(record) = self.store.touch(session_id).await else {
            warn!(session_id = %session_id, "Cannot switch to unknown session");
            return Err(TodoBoardError::session_not_found(session_id));
        };

        self.current_session_id = Some(session_id.to_string());
        info!(session_id = %session_id, "Switched active session");
        Ok(record)
    }

    /// Replaces the current session's todos.
    ///
    /// Returns `Ok(false)` when no session is current.
    pub async fn update_current_session(
        &self,
        todos: Vec<TodoItem>,
        metadata: SessionMetadata,
    ) -> Result<bool> {
        let Some(session_id) = self.current_session_id.as_deref() else {
            debug!("No current session to update");
            return Ok(false);
        };

        let now = Utc::now();
        let metadata = SessionMetadata {
            last_worked_on: Some(now),
            ..metadata
        };
        self.store.save(session_id, todos, metadata).await?;
        Ok(true)
    }

    /// Progress summaries, most recently worked on first
    pub fn session_overview<'a>(
        records: impl IntoIterator<Item = &'a SessionRecord>,
    ) -> Vec<SessionOverview> {
        let mut records: Vec<&SessionRecord> = records.into_iter().collect();
        records.sort_by(|a, b| by_recency(a, b));
        records.into_iter().map(SessionRecord::overview).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::{Priority, TodoStatus};
    use chrono::{DateTime, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 6, hour, 0, 0).unwrap()
    }

    fn todos(statuses: &[TodoStatus]) -> Vec<TodoItem> {
        statuses
            .iter()
            .map(|s| TodoItem::new("Review the design notes", *s, Priority::Medium))
            .collect()
    }

    async fn seed(store: &SessionStore, id: &str, statuses: &[TodoStatus], hour: u32) {
        store
            .save(
                id,
                todos(statuses),
                SessionMetadata::new().with_last_worked_on(at(hour)),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_incomplete_sessions_filters_terminal() {
        let store = Arc::new(SessionStore::new());
        seed(&store, "open", &[TodoStatus::Completed, TodoStatus::InProgress], 9).await;
        seed(&store, "done", &[TodoStatus::Completed, TodoStatus::Cancelled], 10).await;
        seed(&store, "empty", &[], 11).await;

        let manager = SessionManager::new(store);
        let incomplete = manager.incomplete_sessions().await;

        assert_eq!(incomplete.keys().collect::<Vec<_>>(), vec!["open"]);
    }

    #[tokio::test]
    async fn test_most_recent_incomplete_none_on_empty_store() {
        let manager = SessionManager::new(Arc::new(SessionStore::new()));
        assert!(manager.most_recent_incomplete().await.is_none());
    }

    #[tokio::test]
    async fn test_most_recent_incomplete_tie_breaks_by_id() {
        let store = Arc::new(SessionStore::new());
        seed(&store, "zeta", &[TodoStatus::Pending], 12).await;
        seed(&store, "alpha", &[TodoStatus::Pending], 12).await;
        seed(&store, "older", &[TodoStatus::Pending], 8).await;

        let manager = SessionManager::new(store);
        let picked = manager.most_recent_incomplete().await.unwrap();
        assert_eq!(picked.id, "alpha");
    }

    #[tokio::test]
    async fn test_initialize_new_chat_is_one_shot() {
        let store = Arc::new(SessionStore::new());
        let mut manager = SessionManager::new(Arc::clone(&store));

        assert_eq!(manager.init_state(), ChatInitState::NotInitialized);
        assert_eq!(
            manager.initialize_new_chat().await,
            Some(ChatInit::NoActiveTodos)
        );
        assert_eq!(manager.init_state(), ChatInitState::Initialized);

        seed(&store, "a", &[TodoStatus::Pending], 9).await;
        assert!(manager.initialize_new_chat().await.is_none());
        assert!(manager.current_session_id().is_none());
    }

    #[tokio::test]
    async fn test_initialize_orders_other_sessions() {
        let store = Arc::new(SessionStore::new());
        seed(&store, "design", &[TodoStatus::Pending], 10).await;
        seed(&store, "api", &[TodoStatus::InProgress], 9).await;
        seed(&store, "marketing", &[TodoStatus::Pending], 8).await;

        let mut manager = SessionManager::new(store);
        let Some(ChatInit::Resumed {
            current,
            others,
            session_count,
        }) = manager.initialize_new_chat().await
        else {
            panic!("expected a resumed session");
        };

        assert_eq!(current.id, "design");
        assert_eq!(session_count, 3);
        let other_ids: Vec<&str> = others.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(other_ids, vec!["api", "marketing"]);
        assert_eq!(manager.current_session_id(), Some("design"));
    }

    #[tokio::test]
    async fn test_switch_to_unknown_session() {
        let store = Arc::new(SessionStore::new());
        seed(&store, "a", &[TodoStatus::Pending], 9).await;
        let before = store.load_all().await;

        let mut manager = SessionManager::new(Arc::clone(&store));
        let err = manager.switch_to_session("missing").await.unwrap_err();

        assert!(matches!(err, TodoBoardError::SessionNotFound { .. }));
        assert!(manager.current_session_id().is_none());
        assert_eq!(store.load_all().await, before);
    }

    #[tokio::test]
    async fn test_switch_bumps_last_worked_on() {
        let store = Arc::new(SessionStore::new());
        seed(&store, "a", &[TodoStatus::Pending], 9).await;

        let mut manager = SessionManager::new(Arc::clone(&store));
        let record = manager.switch_to_session("a").await.unwrap();

        assert!(record.last_worked_on > at(9));
        assert_eq!(manager.current_session_id(), Some("a"));
        assert_eq!(store.get("a").await.unwrap(), record);
    }

    #[tokio::test]
    async fn test_update_without_current_session() {
        let store = Arc::new(SessionStore::new());
        let manager = SessionManager::new(Arc::clone(&store));

        let updated = manager
            .update_current_session(todos(&[TodoStatus::Pending]), SessionMetadata::new())
            .await
            .unwrap();
        assert!(!updated);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_current_session_replaces_todos() {
        let store = Arc::new(SessionStore::new());
        seed(&store, "a", &[TodoStatus::Pending, TodoStatus::Pending], 9).await;

        let mut manager = SessionManager::new(Arc::clone(&store));
        manager.switch_to_session("a").await.unwrap();
        let updated = manager
            .update_current_session(todos(&[TodoStatus::Completed]), SessionMetadata::new())
            .await
            .unwrap();

        assert!(updated);
        let record = store.get("a").await.unwrap();
        assert_eq!(record.todos.len(), 1);
        assert!(!record.is_incomplete());
    }

    #[tokio::test]
    async fn test_session_overview_order() {
        let store = SessionStore::new();
        seed(&store, "old", &[TodoStatus::Pending], 8).await;
        seed(&store, "new", &[TodoStatus::Completed, TodoStatus::InProgress], 11).await;

        let records = store.load_all().await;
        let overview = SessionManager::session_overview(records.values());

        assert_eq!(overview[0].id, "new");
        assert_eq!(overview[0].progress, "1/2 complete, 1 in progress");
        assert_eq!(overview[1].id, "old");
    }
}
