use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use todoboard::presentation::{render_todos, DisplayStyle, Presenter};
use todoboard::session::{SessionManager, SessionMetadata, SessionStore};
use todoboard::todo::{Priority, TodoItem, TodoStatus};

fn sample_todos(count: usize) -> Vec<TodoItem> {
    let statuses = [
        TodoStatus::Completed,
        TodoStatus::InProgress,
        TodoStatus::Pending,
        TodoStatus::Cancelled,
    ];
    (0..count)
        .map(|i| {
            TodoItem::new(
                format!("Implement feature number {} of the design system", i),
                statuses[i % statuses.len()],
                Priority::Medium,
            )
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let todos = sample_todos(20);
    c.bench_function("render_todos_minimalist", |b| {
        b.iter(|| render_todos(black_box(&todos), DisplayStyle::Minimalist))
    });
}

fn bench_present(c: &mut Criterion) {
    let todos = sample_todos(20);
    let presenter = Presenter::default();
    c.bench_function("present_with_scorecard", |b| {
        b.iter(|| presenter.present(black_box(&todos), DisplayStyle::Terminal, true))
    });
}

fn bench_most_recent_incomplete(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = Arc::new(SessionStore::new());
    rt.block_on(async {
        for i in 0..200 {
            store
                .save(&format!("session-{}", i), sample_todos(5), SessionMetadata::new())
                .await
                .unwrap();
        }
    });
    let manager = SessionManager::new(store);

    c.bench_function("most_recent_incomplete_200", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(manager.most_recent_incomplete().await) })
    });
}

criterion_group!(benches, bench_render, bench_present, bench_most_recent_incomplete);
criterion_main!(benches);
