use crate::session::types::{SessionMetadata, SessionRecord};
use crate::todo::{validate_todos, TodoItem};
use crate::utils::Result;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// In-memory mapping from session id to session record.
///
/// Every read-modify-write (save, touch) runs under a single write lock, so
/// concurrent callers never observe or produce a half-applied update.
/// Readers get copies, never references into the map.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<BTreeMap<String, SessionRecord>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or updates the record for `id`.
    ///
    /// Timestamps default to now unless `metadata` overrides them. Without an
    /// override, `last_worked_on` never moves backwards.
    pub async fn save(
        &self,
        id: &str,
        todos: Vec<TodoItem>,
        metadata: SessionMetadata,
    ) -> Result<SessionRecord> {
        validate_todos(&todos)?;

        let now = Utc::now();
        let mut guard = self.sessions.write().await;

        let record = match guard.get(id) {
            Some(previous) => {
                let mut extra = previous.extra.clone();
                extra.extend(metadata.extra);
                SessionRecord {
                    id: id.to_string(),
                    title: metadata.title.or_else(|| previous.title.clone()),
                    todos,
                    last_modified: metadata.last_modified.unwrap_or(now),
                    last_worked_on: metadata
                        .last_worked_on
                        .unwrap_or_else(|| now.max(previous.last_worked_on)),
                    extra,
                }
            }
            None => SessionRecord {
                id: id.to_string(),
                title: metadata.title,
                todos,
                last_modified: metadata.last_modified.unwrap_or(now),
                last_worked_on: metadata.last_worked_on.unwrap_or(now),
                extra: metadata.extra,
            },
        };

        let created = guard.insert(id.to_string(), record.clone()).is_none();
        drop(guard);

        debug!(
            session_id = %id,
            todo_count = record.todos.len(),
            created,
            "Saved session"
        );
        Ok(record)
    }

    /// Bumps `last_worked_on` for an existing record. Absent ids are left alone.
    pub async fn touch(&self, id: &str) -> Option<SessionRecord> {
        let mut guard = self.sessions.write().await;
        let record = guard.get_mut(id)?;
        record.last_worked_on = Utc::now().max(record.last_worked_on);
        Some(record.clone())
    }

    /// Snapshot of every record, ordered by id
    pub async fn load_all(&self) -> BTreeMap<String, SessionRecord> {
        self.sessions.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<SessionRecord> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// All records as a list, for the snapshot layer
    pub async fn records(&self) -> Vec<SessionRecord> {
        self.sessions.read().await.values().cloned().collect()
    }

    /// Inserts records loaded from a snapshot, replacing any with the same id
    pub async fn restore(&self, records: Vec<SessionRecord>) {
        let mut guard = self.sessions.write().await;
        for record in records {
            guard.insert(record.id.clone(), record);
        }
        let count = guard.len();
        drop(guard);

        info!("SessionStore restored with {} sessions", count);
    }
}
