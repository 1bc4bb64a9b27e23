use crate::presentation::style::DisplayStyle;
use crate::todo::TodoItem;

/// Border glyph repetitions per line
pub const CONTAINER_WIDTH: usize = 48;

/// Characters of todo content kept per line
pub const MAX_TASK_CHARS: usize = 40;

/// Pads `text` with spaces to `width` characters. Longer text is left as is.
pub fn pad_end(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let mut padded = text.to_string();
    if len < width {
        padded.extend(std::iter::repeat_n(' ', width - len));
    }
    padded
}

/// Draws the todo list inside a box made of the style's border glyph
pub fn render_todos(todos: &[TodoItem], style: DisplayStyle) -> String {
    let border = style.border();
    let border_line = border.repeat(CONTAINER_WIDTH);

    let mut lines = Vec::with_capacity(todos.len() + 2);
    lines.push(border_line.clone());
    for todo in todos {
        let task: String = todo.content.chars().take(MAX_TASK_CHARS).collect();
        let row = format!("{} {} {}", border, todo.status.symbol(), task);
        lines.push(format!("{}{}", pad_end(&row, CONTAINER_WIDTH - 1), border));
    }
    lines.push(border_line);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::{Priority, TodoStatus};

    fn sample() -> Vec<TodoItem> {
        vec![
            TodoItem::new("Review design docs", TodoStatus::Completed, Priority::High),
            TodoItem::new("Create typography guide", TodoStatus::InProgress, Priority::Medium),
            TodoItem::new("Test fonts", TodoStatus::Pending, Priority::Low),
            TodoItem::new("Drop legacy theme", TodoStatus::Cancelled, Priority::Low),
        ]
    }

    #[test]
    fn test_minimalist_lines_share_width() {
        let display = render_todos(&sample(), DisplayStyle::Minimalist);
        let lines: Vec<&str> = display.lines().collect();

        assert_eq!(lines.len(), 6);
        for line in &lines {
            assert_eq!(line.chars().count(), CONTAINER_WIDTH);
        }
        assert!(lines[1].starts_with("▓ [✓] Review design docs"));
        assert!(lines[2].contains("[~]"));
        assert!(lines[3].contains("[ ]"));
        assert!(lines[4].contains("[×]"));
        assert!(lines[1].ends_with('▓'));
    }

    #[test]
    fn test_content_truncated_to_forty_chars() {
        let long = "x".repeat(60);
        let todos = vec![TodoItem::new(long, TodoStatus::Pending, Priority::Low)];
        let display = render_todos(&todos, DisplayStyle::Modern);
        let row = display.lines().nth(1).unwrap();

        assert!(row.contains(&"x".repeat(MAX_TASK_CHARS)));
        assert!(!row.contains(&"x".repeat(MAX_TASK_CHARS + 1)));
    }

    #[test]
    fn test_empty_list_is_just_borders() {
        let display = render_todos(&[], DisplayStyle::Terminal);
        assert_eq!(display.lines().count(), 2);
        assert_eq!(display.lines().next().unwrap(), "░▒▓".repeat(CONTAINER_WIDTH));
    }

    #[test]
    fn test_pad_end_counts_chars() {
        assert_eq!(pad_end("▓a", 4), "▓a  ");
        assert_eq!(pad_end("abcdef", 3), "abcdef");
    }
}
