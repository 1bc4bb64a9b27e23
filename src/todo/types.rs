use crate::utils::{Result, TodoBoardError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Todo status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TodoStatus {
    /// Completed and cancelled todos need no further work
    pub fn is_terminal(self) -> bool {
        matches!(self, TodoStatus::Completed | TodoStatus::Cancelled)
    }

    /// Checkbox symbol used when rendering
    pub fn symbol(self) -> &'static str {
        match self {
            TodoStatus::Pending => "[ ]",
            TodoStatus::InProgress => "[~]",
            TodoStatus::Completed => "[✓]",
            TodoStatus::Cancelled => "[×]",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoStatus::Pending => write!(f, "pending"),
            TodoStatus::InProgress => write!(f, "in_progress"),
            TodoStatus::Completed => write!(f, "completed"),
            TodoStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// A single entry of a session's todo list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub content: String,
    pub status: TodoStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_effort: Option<String>,
}

impl TodoItem {
    pub fn new(content: impl Into<String>, status: TodoStatus, priority: Priority) -> Self {
        Self {
            content: content.into(),
            status,
            priority,
            tags: Vec::new(),
            estimated_effort: None,
        }
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_estimated_effort(mut self, effort: impl Into<String>) -> Self {
        self.estimated_effort = Some(effort.into());
        self
    }

    pub fn with_status(mut self, status: TodoStatus) -> Self {
        self.status = status;
        self
    }

    /// Pending or in progress
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Rejects entries whose content is blank
    pub fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(TodoBoardError::invalid_input("todo content must not be empty"));
        }
        Ok(())
    }
}

/// Validates every entry, reporting the 1-based position of the first bad one
pub fn validate_todos(todos: &[TodoItem]) -> Result<()> {
    for (index, todo) in todos.iter().enumerate() {
        todo.validate().map_err(|_| {
            TodoBoardError::invalid_input(format!("todo #{} has empty content", index + 1))
        })?;
    }
    Ok(())
}

/// Parses a JSON array of todos.
///
/// Entries missing `content` or `status`, or carrying an unknown status, are
/// rejected instead of defaulted.
pub fn parse_todos(json: &str) -> Result<Vec<TodoItem>> {
    let todos: Vec<TodoItem> = serde_json::from_str(json)
        .map_err(|e| TodoBoardError::invalid_input(format!("malformed todo list: {}", e)))?;
    validate_todos(&todos)?;
    Ok(todos)
}
