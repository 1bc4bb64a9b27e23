use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use todoboard::config::{default_snapshot_path, load_config, CliOverrides, Config};
use todoboard::presentation::{DisplayStyle, Presenter};
use todoboard::session::{Persistence, SessionManager, SessionMetadata, SessionStore};
use todoboard::todo::{parse_todos, Priority, TodoItem, TodoStatus};
use todoboard::trigger::TriggerContext;
use todoboard::{TodoBoard, TodoBoardError};

#[derive(Parser)]
#[command(name = "todoboard")]
#[command(about = "todoboard - todo sessions that follow you across chats")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config.json (default: ~/.todoboard/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Session snapshot file (default: ~/.todoboard/sessions.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Show the todo list every N messages
    #[arg(long, global = true, value_name = "N")]
    pub interval: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display version information
    Version,
    /// Save a session's todo list from a JSON file ("-" reads stdin)
    Save {
        id: String,
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,
        #[arg(long)]
        title: Option<String>,
    },
    /// List sessions that still have open todos
    List,
    /// Start a new chat and pick up the most recent open session
    Resume,
    /// Make another session the one being worked on
    Switch { id: String },
    /// Render a session
    Show {
        id: String,
        #[arg(long, default_value = "minimalist")]
        style: DisplayStyle,
        #[arg(long)]
        no_scorecard: bool,
    },
    /// Walk through sessions, triggers and styles with sample data
    Demo,
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(
        CliOverrides {
            message_interval: cli.interval,
            snapshot_path: cli.snapshot,
        },
        cli.config,
    )?;

    match cli.command {
        Commands::Version => {
            print_version();
            Ok(())
        }
        Commands::Demo => run_demo(&config).await,
        command => {
            let snapshot_path = config
                .snapshot_path
                .clone()
                .or_else(default_snapshot_path)
                .context("Could not determine a snapshot location, pass --snapshot")?;
            let persistence = Persistence::new(snapshot_path);

            let store = Arc::new(SessionStore::new());
            store.restore(persistence.load().await?).await;
            let mut board = TodoBoard::new(Arc::clone(&store), &config);

            if execute(command, &mut board, &config).await? {
                persistence.save(&store.records().await).await?;
            }
            Ok(())
        }
    }
}

/// Runs a session command. Returns true when the store changed.
async fn execute(command: Commands, board: &mut TodoBoard, config: &Config) -> Result<bool> {
    match command {
        Commands::Save { id, file, title } => {
            let json = read_input(&file)?;
            let todos = parse_todos(&json)?;
            let metadata = match title {
                Some(title) => SessionMetadata::new().with_title(title),
                None => SessionMetadata::new(),
            };
            let record = board.save_session(&id, todos, metadata).await?;

            println!("Saved session {}", record.display_name());
            println!();
            println!("{}", board.present(&record.todos, config.trigger.default_style).display);
            Ok(true)
        }
        Commands::List => {
            let incomplete = board.manager().incomplete_sessions().await;
            if incomplete.is_empty() {
                println!("No active sessions.");
            } else {
                println!("ACTIVE SESSIONS ({}):", incomplete.len());
                for overview in SessionManager::session_overview(incomplete.values()) {
                    println!(
                        "• {} [{}] - {} ({})",
                        overview.title, overview.id, overview.progress, overview.last_worked
                    );
                }
            }
            Ok(false)
        }
        Commands::Resume => {
            if let Some(init) = board.initialize_new_chat().await {
                println!("{}", board.resume_message(&init));
            }
            Ok(false)
        }
        Commands::Switch { id } => {
            let record = board.switch_session(&id).await?;
            println!("{}", board.switch_message(&record));
            Ok(true)
        }
        Commands::Show {
            id,
            style,
            no_scorecard,
        } => {
            let record = board
                .store()
                .get(&id)
                .await
                .ok_or_else(|| TodoBoardError::session_not_found(&id))?;
            let presenter = Presenter::with_weights(config.score_weights);
            let presentation =
                presenter.present(&record.todos, style, config.show_scorecard && !no_scorecard);

            println!("{}", record.display_name());
            println!();
            println!("{}", presentation.display);
            println!();
            println!(
                "Score: {:.1}/10 ({})",
                presentation.evaluation.overall, presentation.tier
            );
            Ok(false)
        }
        Commands::Version | Commands::Demo => Ok(false),
    }
}

fn read_input(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read todos from stdin")
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read todo file: {:?}", file))
    }
}

fn demo_todo(content: &str, status: TodoStatus, priority: Priority) -> TodoItem {
    TodoItem::new(content, status, priority)
}

async fn run_demo(config: &Config) -> Result<()> {
    use TodoStatus::{Completed, InProgress, Pending};

    let store = Arc::new(SessionStore::new());
    let mut board = TodoBoard::new(Arc::clone(&store), config);

    let design_todos = vec![
        demo_todo("Review design system documentation", Completed, Priority::High),
        demo_todo("Create typography style guide", InProgress, Priority::Medium),
        demo_todo("Test font combinations", Pending, Priority::Medium),
        demo_todo("Apply Awwwards evaluation criteria", Pending, Priority::High),
    ];
    let sessions = [
        (
            "design-system-2025",
            "Design System Project",
            design_todos.clone(),
            Utc.with_ymd_and_hms(2025, 7, 6, 10, 30, 0),
        ),
        (
            "api-refactor",
            "API Refactor Sprint",
            vec![
                demo_todo("Audit existing endpoints", Completed, Priority::High),
                demo_todo("Design new schema", Completed, Priority::High),
                demo_todo("Implement user endpoints", InProgress, Priority::High),
                demo_todo("Write integration tests", Pending, Priority::Medium),
            ],
            Utc.with_ymd_and_hms(2025, 7, 5, 14, 20, 0),
        ),
        (
            "marketing-campaign",
            "Q3 Marketing Campaign",
            vec![
                demo_todo("Research target audience demographics", Completed, Priority::High),
                demo_todo("Create brand messaging framework", Completed, Priority::High),
                demo_todo("Design social media templates", InProgress, Priority::Medium),
                demo_todo("Plan content calendar", Pending, Priority::Medium),
                demo_todo("Set up analytics tracking", Pending, Priority::Low),
            ],
            Utc.with_ymd_and_hms(2025, 7, 4, 16, 45, 0),
        ),
    ];

    for (id, title, todos, worked_on) in sessions {
        let worked_on = worked_on.single().context("invalid demo timestamp")?;
        board
            .save_session(
                id,
                todos,
                SessionMetadata::new()
                    .with_title(title)
                    .with_last_worked_on(worked_on),
            )
            .await?;
    }

    section("NEW CHAT INITIALIZATION");
    if let Some(init) = board.initialize_new_chat().await {
        println!("{}", board.resume_message(&init));
    }

    section("CONTEXTUAL TRIGGERS");
    if let Some(output) = board
        .display_if_triggered(
            "design-system-2025",
            design_todos.clone(),
            &TriggerContext::user_asked(),
        )
        .await?
    {
        println!("{}", output.text);
    }

    let updated: Vec<TodoItem> = design_todos
        .iter()
        .cloned()
        .map(|t| {
            if t.content == "Test font combinations" {
                t.with_status(Completed)
            } else {
                t
            }
        })
        .collect();
    if let Some(output) = board
        .display_if_triggered(
            "design-system-2025",
            updated,
            &TriggerContext::item_completed(),
        )
        .await?
    {
        println!();
        println!("{}", output.text);
    }

    section("SESSION SWITCHING");
    let record = board.switch_session("api-refactor").await?;
    println!("{}", board.switch_message(&record));

    section("STYLE VARIATIONS");
    let presenter = Presenter::with_weights(config.score_weights);
    for style in DisplayStyle::ALL {
        let presentation = presenter.present(&design_todos, style, false);
        println!("{}:", style.to_string().to_uppercase());
        println!("{}", presentation.display);
        println!(
            "Score: {:.1}/10 ({})",
            presentation.evaluation.overall, presentation.tier
        );
        println!();
    }

    section("DETAILED EVALUATION");
    let eval = presenter
        .present(&design_todos, DisplayStyle::Minimalist, false)
        .evaluation;
    let weights = config.score_weights;
    let axes = [
        ("Design:    ", eval.design, weights.design),
        ("Usability: ", eval.usability, weights.usability),
        ("Creativity:", eval.creativity, weights.creativity),
        ("Content:   ", eval.content, weights.content),
    ];
    for (name, score, weight) in axes {
        println!("• {} {:.1}/10 ({:.0}% weight)", name, score, weight * 100.0);
    }
    println!("• OVERALL:    {:.1}/10", eval.overall);
    println!("• ACHIEVEMENT: {}", eval.tier());

    Ok(())
}

fn section(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

pub fn extract_command_from_error(error_msg: &str) -> String {
    // e.g. "error: unrecognized subcommand 'invalid_command'"
    if let Some(start) = error_msg.find('\'') {
        if let Some(end) = error_msg[start + 1..].find('\'') {
            return error_msg[start + 1..start + 1 + end].to_string();
        }
    }
    "unknown".to_string()
}

fn print_version() {
    println!("todoboard {}", env!("CARGO_PKG_VERSION"));
}
