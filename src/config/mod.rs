pub mod loader;
pub mod schema;

pub use loader::{default_snapshot_path, get_config_path, load_config, save_config, CliOverrides};
pub use schema::Config;
