use crate::config::schema::Config;
use crate::utils::TodoBoardError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
pub(crate) static CONFIG_TEST_ENV_LOCK: Mutex<()> = Mutex::new(());

pub const ENV_MESSAGE_INTERVAL: &str = "TODOBOARD_MESSAGE_INTERVAL";
pub const ENV_SNAPSHOT: &str = "TODOBOARD_SNAPSHOT";

/// Values passed on the command line, highest precedence
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub message_interval: Option<u64>,
    pub snapshot_path: Option<PathBuf>,
}

/// Builds the configuration: defaults, then the JSON file, then
/// `TODOBOARD_*` environment variables, then CLI flags.
pub fn load_config(cli: CliOverrides, cli_config_path: Option<PathBuf>) -> Result<Config> {
    tracing::debug!("Loading configuration");

    let mut config = Config::default();

    let config_file = cli_config_path.or_else(get_default_config_path);
    if let Some(ref path) = config_file {
        if path.exists() {
            tracing::debug!(config_path = %path.display(), "Loading configuration from file");
            config = read_config_file(path)?;
        } else {
            tracing::debug!(config_path = %path.display(), "Config file not found, using defaults");
        }
    }

    tracing::debug!("Applying environment variable overrides");
    config = merge_env_variables(config);

    if let Some(interval) = cli.message_interval {
        tracing::debug!(interval, "Applying CLI interval override");
        config.trigger.message_interval = interval;
    }
    if let Some(path) = cli.snapshot_path {
        tracing::debug!(snapshot = %path.display(), "Applying CLI snapshot override");
        config.snapshot_path = Some(path);
    }

    let summary = config.get_summary();
    tracing::debug!(
        message_interval = summary.message_interval,
        style_rules = summary.style_rule_count,
        show_scorecard = summary.show_scorecard,
        snapshot_configured = summary.snapshot_configured,
        "Configuration loaded successfully"
    );

    Ok(config)
}

fn read_config_file(path: &Path) -> std::result::Result<Config, TodoBoardError> {
    let content = fs::read_to_string(path).map_err(|e| TodoBoardError::io(path, e))?;

    serde_json::from_str(&content).map_err(|e| {
        TodoBoardError::config(format!(
            "{} contains invalid JSON: {}",
            path.display(),
            e
        ))
    })
}

fn merge_env_variables(mut config: Config) -> Config {
    if let Ok(raw) = std::env::var(ENV_MESSAGE_INTERVAL) {
        match raw.trim().parse::<u64>() {
            Ok(interval) => config.trigger.message_interval = interval,
            Err(_) => tracing::warn!(
                value = %raw,
                "Ignoring {} that is not a non-negative integer",
                ENV_MESSAGE_INTERVAL
            ),
        }
    }

    if let Some(path) = std::env::var(ENV_SNAPSHOT).ok().filter(|p| !p.trim().is_empty()) {
        config.snapshot_path = Some(PathBuf::from(path));
    }

    config
}

pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json).with_context(|| format!("Failed to write config file: {:?}", path))?;

    tracing::info!("Configuration saved to {:?}", path);
    Ok(())
}

fn get_default_config_path() -> Option<PathBuf> {
    get_data_dir().map(|dir| dir.join("config.json"))
}

/// `~/.todoboard`
pub fn get_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".todoboard"))
}

pub fn get_config_path() -> Option<PathBuf> {
    get_default_config_path()
}

/// Snapshot location used by the CLI when nothing is configured
pub fn default_snapshot_path() -> Option<PathBuf> {
    get_data_dir().map(|dir| dir.join("sessions.json"))
}
