use crate::todo::{TodoItem, TodoStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub todos: Vec<TodoItem>,
    pub last_modified: DateTime<Utc>,
    pub last_worked_on: DateTime<Utc>,
    /// Caller metadata the record does not model itself
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl SessionRecord {
    pub fn new(id: impl Into<String>, todos: Vec<TodoItem>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: None,
            todos,
            last_modified: now,
            last_worked_on: now,
            extra: BTreeMap::new(),
        }
    }

    /// Title if set, otherwise the id
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    /// At least one todo is pending or in progress
    pub fn is_incomplete(&self) -> bool {
        self.todos.iter().any(TodoItem::is_open)
    }

    pub fn count_status(&self, status: TodoStatus) -> usize {
        self.todos.iter().filter(|t| t.status == status).count()
    }

    pub fn overview(&self) -> SessionOverview {
        let completed = self.count_status(TodoStatus::Completed);
        let in_progress = self.count_status(TodoStatus::InProgress);
        let total = self.todos.len();
        SessionOverview {
            id: self.id.clone(),
            title: self.display_name().to_string(),
            completed,
            in_progress,
            total,
            progress: format!(
                "{}/{} complete, {} in progress",
                completed, total, in_progress
            ),
            last_worked: self.last_worked_on.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Optional fields merged into a record on save.
///
/// Absent fields keep the record's previous values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_worked_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl SessionMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_last_modified(mut self, at: DateTime<Utc>) -> Self {
        self.last_modified = Some(at);
        self
    }

    pub fn with_last_worked_on(mut self, at: DateTime<Utc>) -> Self {
        self.last_worked_on = Some(at);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// One-line progress summary of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOverview {
    pub id: String,
    pub title: String,
    pub completed: usize,
    pub in_progress: usize,
    pub total: usize,
    pub progress: String,
    pub last_worked: String,
}
