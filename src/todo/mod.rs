pub mod types;

pub use types::{parse_todos, validate_todos, Priority, TodoItem, TodoStatus};
