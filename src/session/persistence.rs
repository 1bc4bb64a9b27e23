use crate::session::types::SessionRecord;
use crate::todo::validate_todos;
use crate::utils::TodoBoardError;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    sessions: Vec<SessionRecord>,
}

/// JSON snapshot of the session store on disk
pub struct Persistence {
    pub snapshot_path: PathBuf,
}

impl Persistence {
    pub fn new(snapshot_path: PathBuf) -> Self {
        Self { snapshot_path }
    }

    pub async fn save(&self, sessions: &[SessionRecord]) -> Result<()> {
        if let Some(parent) = self.snapshot_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| TodoBoardError::io(parent, e))?;
            }
        }

        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            sessions: sessions.to_vec(),
        };
        let json = serde_json::to_string_pretty(&snapshot).map_err(TodoBoardError::from)?;

        fs::write(&self.snapshot_path, json)
            .await
            .map_err(|e| TodoBoardError::io(&self.snapshot_path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.snapshot_path, permissions)
                .await
                .with_context(|| {
                    format!("Failed to set permissions on: {:?}", self.snapshot_path)
                })?;
        }

        info!(
            "Saved {} sessions to {:?}",
            sessions.len(),
            self.snapshot_path
        );
        Ok(())
    }

    /// Loads the snapshot. A missing file means no sessions; a file that does
    /// not parse is moved aside and also yields no sessions. Records holding
    /// invalid todos are dropped.
    pub async fn load(&self) -> Result<Vec<SessionRecord>> {
        let json = match fs::read_to_string(&self.snapshot_path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No snapshot at {:?}, starting empty", self.snapshot_path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(TodoBoardError::io(&self.snapshot_path, e).into()),
        };

        let snapshot = match serde_json::from_str::<Snapshot>(&json) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Failed to parse snapshot {:?}: {}", self.snapshot_path, e);
                self.handle_corrupted_file(&self.snapshot_path).await?;
                return Ok(Vec::new());
            }
        };

        let total = snapshot.sessions.len();
        let sessions: Vec<SessionRecord> = snapshot
            .sessions
            .into_iter()
            .filter(|record| match validate_todos(&record.todos) {
                Ok(()) => true,
                Err(e) => {
                    warn!(
                        session_id = %record.id,
                        error = %e,
                        "Skipping invalid session in snapshot"
                    );
                    false
                }
            })
            .collect();

        info!(
            "Loaded {} of {} sessions from {:?}",
            sessions.len(),
            total,
            self.snapshot_path
        );
        Ok(sessions)
    }

    async fn handle_corrupted_file(&self, file_path: &Path) -> Result<()> {
        let mut corrupted_path = corrupted_path_for(file_path, None);
        if fs::try_exists(&corrupted_path).await.unwrap_or(false) {
            let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3f").to_string();
            corrupted_path = corrupted_path_for(file_path, Some(&stamp));
        }

        fs::rename(file_path, &corrupted_path)
            .await
            .with_context(|| format!("Failed to rename corrupted file: {:?}", file_path))?;

        error!(
            "Corrupted snapshot detected. Moved {:?} to {:?}",
            file_path, corrupted_path
        );
        Ok(())
    }
}

/// `sessions.json` becomes `sessions.json.corrupted`, or
/// `sessions.json.<stamp>.corrupted` when a backup already exists
fn corrupted_path_for(path: &Path, stamp: Option<&str>) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    if let Some(stamp) = stamp {
        name.push(".");
        name.push(stamp);
    }
    name.push(".corrupted");
    path.with_file_name(name)
}
