//! Saved progress.
//!
//! High score, unlocked levels and player stats live in a small JSON file.
//! All file I/O happens in a background task so the frame loop never blocks.

use std::path::{Path, PathBuf};

use log::{error, info, warn};
use tokio::sync::{mpsc, oneshot};

use crate::error::PersistenceError;
use crate::progress::ProgressRecord;

/// Commands sent to the persistence background task
#[derive(Debug)]
pub enum PersistenceCommand {
    /// Overwrite the saved record
    Save(ProgressRecord),
    /// Read the saved record (response sent via oneshot channel)
    Load {
        response: oneshot::Sender<Option<ProgressRecord>>,
    },
    /// Stop the task once everything queued before it has been written
    Shutdown {
        done: oneshot::Sender<()>,
    },
}

/// Handle for sending commands to the persistence task
#[derive(Debug, Clone)]
pub struct PersistenceHandle {
    sender: mpsc::Sender<PersistenceCommand>,
}

impl PersistenceHandle {
    /// Save progress (fire and forget, non-blocking)
    pub fn save(&self, record: ProgressRecord) {
        if let Err(e) = self.sender.try_send(PersistenceCommand::Save(record)) {
            warn!("Dropping progress save: {}", e);
        }
    }

    /// Load saved progress. `None` if nothing was saved or the file is unreadable.
    pub async fn load(&self) -> Option<ProgressRecord> {
        let (tx, rx) = oneshot::channel();
        if self
            .sender
            .send(PersistenceCommand::Load { response: tx })
            .await
            .is_err()
        {
            return None;
        }
        rx.await.ok().flatten()
    }

    /// Flush pending saves and stop the task
    pub async fn shutdown(&self) -> Result<(), PersistenceError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(PersistenceCommand::Shutdown { done: tx })
            .await
            .map_err(|_| PersistenceError::Closed)?;
        rx.await.map_err(|_| PersistenceError::Closed)
    }
}

/// Spawn the background task writing to `path`.
/// Fails if the parent directory does not exist.
pub fn init(path: impl Into<PathBuf>) -> Result<PersistenceHandle, PersistenceError> {
    let path = path.into();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(PersistenceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("directory {} does not exist", parent.display()),
            )));
        }
    }

    let (tx, rx) = mpsc::channel(64);
    tokio::spawn(persistence_task(path.clone(), rx));
    info!("Persistence task started ({})", path.display());

    Ok(PersistenceHandle { sender: tx })
}

async fn persistence_task(path: PathBuf, mut rx: mpsc::Receiver<PersistenceCommand>) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            PersistenceCommand::Save(record) => {
                if let Err(e) = write_record(&path, &record).await {
                    error!("Failed to save progress to {}: {}", path.display(), e);
                }
            }

            PersistenceCommand::Load { response } => {
                let record = match read_record(&path).await {
                    Ok(record) => record,
                    Err(e) => {
                        warn!("Ignoring unreadable progress file {}: {}", path.display(), e);
                        None
                    }
                };
                let _ = response.send(record);
            }

            PersistenceCommand::Shutdown { done } => {
                info!("Persistence task shutting down");
                let _ = done.send(());
                break;
            }
        }
    }

    info!("Persistence task stopped");
}

/// Read a saved record. A missing file is not an error.
pub async fn read_record(path: &Path) -> Result<Option<ProgressRecord>, PersistenceError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write via a temporary file so a crash never leaves a half-written save
pub async fn write_record(path: &Path, record: &ProgressRecord) -> Result<(), PersistenceError> {
    let json = serde_json::to_vec_pretty(record)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::PlayerStats;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ascent-{}-{}.json", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let _ = tokio::fs::remove_file(&path).await;
        let handle = init(&path).expect("temp dir exists");

        assert_eq!(handle.load().await, None);

        let record = ProgressRecord {
            high_score: 4200,
            unlocked_levels: 7,
            player_stats: PlayerStats {
                coins: 31,
                ..PlayerStats::default()
            },
        };
        handle.save(record.clone());
        assert_eq!(handle.load().await, Some(record));

        handle.shutdown().await.expect("task running");
        assert!(handle.load().await.is_none());
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_error() {
        let path = temp_path("corrupt");
        tokio::fs::write(&path, b"not json").await.expect("write temp file");
        assert!(matches!(read_record(&path).await, Err(PersistenceError::Json(_))));
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_missing_directory_is_rejected() {
        let path = std::env::temp_dir().join("ascent-no-such-dir").join("progress.json");
        assert!(init(path).is_err());
    }
}
