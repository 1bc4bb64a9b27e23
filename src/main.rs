mod cli;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter_level = if verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(filter_level.into()))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::time())
        .init();
}

#[tokio::main]
async fn main() {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            match e.kind() {
                ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelp
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    e.print().ok();
                    std::process::exit(0);
                }
                ErrorKind::InvalidSubcommand => {
                    let cmd = cli::extract_command_from_error(&e.to_string());
                    eprintln!("error: unknown command: {}", cmd);
                    eprintln!("\nRun 'todoboard --help' to see the available commands.");
                    std::process::exit(1);
                }
                _ => {
                    e.print().ok();
                    std::process::exit(2);
                }
            }
        }
    };

    init_logging(cli.verbose);
    tracing::debug!("Verbose mode enabled");
    tracing::info!("Starting todoboard v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = cli::run(cli).await {
        let board_error = e.downcast_ref::<todoboard::TodoBoardError>();
        let level = board_error.map_or(Level::ERROR, todoboard::TodoBoardError::severity);
        if level == Level::ERROR {
            tracing::error!("Command failed: {:#}", e);
        } else if level == Level::WARN {
            tracing::warn!("Command failed: {:#}", e);
        } else {
            tracing::debug!("Command failed: {:#}", e);
        }

        eprintln!("error: {:#}", e);
        if let Some(hint) = board_error.and_then(todoboard::TodoBoardError::suggestion) {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}
