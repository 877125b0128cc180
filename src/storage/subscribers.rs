//! Subscriber store: the set of chat ids that receive broadcasts.
//!
//! The full set is rewritten to disk after every change. A failed write is
//! logged and the in-memory set stays authoritative for the running process.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::core::error::AppResult;

pub struct SubscriberStore {
    path: PathBuf,
    // Held across the file write so that mutation and persist are atomic
    // from the caller's point of view.
    inner: Mutex<BTreeSet<i64>>,
}

impl SubscriberStore {
    /// Loads persisted subscribers. A missing or corrupt file yields an empty
    /// store.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let set = match fs_err::tokio::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<Vec<i64>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    log::warn!(
                        "Subscriber file {} is corrupt ({}), starting with an empty list",
                        path.display(),
                        e
                    );
                    BTreeSet::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No subscriber file at {}, starting with an empty list", path.display());
                BTreeSet::new()
            }
            Err(e) => {
                log::warn!("Failed to read subscriber file: {}, starting with an empty list", e);
                BTreeSet::new()
            }
        };
        log::info!("Loaded {} subscriber(s)", set.len());

        Self {
            path,
            inner: Mutex::new(set),
        }
    }

    /// Adds a subscriber. Returns `true` when the id was not present before.
    ///
    /// The set is persisted only when it actually changed.
    pub async fn add(&self, chat_id: i64) -> bool {
        let mut guard = self.inner.lock().await;
        if !guard.insert(chat_id) {
            return false;
        }
        if let Err(e) = write_set(&self.path, &guard).await {
            log::error!(
                "Failed to persist subscribers to {} after adding {}: {}",
                self.path.display(),
                chat_id,
                e
            );
        }
        true
    }

    pub async fn contains(&self, chat_id: i64) -> bool {
        self.inner.lock().await.contains(&chat_id)
    }

    /// Snapshot of the current subscribers in ascending id order.
    pub async fn list(&self) -> Vec<i64> {
        self.inner.lock().await.iter().copied().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Writes the full set to disk.
    pub async fn persist(&self) -> AppResult<()> {
        let guard = self.inner.lock().await;
        write_set(&self.path, &guard).await
    }
}

async fn write_set(path: &Path, set: &BTreeSet<i64>) -> AppResult<()> {
    let ids: Vec<i64> = set.iter().copied().collect();
    let data = serde_json::to_string_pretty(&ids)?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs_err::tokio::create_dir_all(dir).await?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs_err::tokio::write(&tmp, data).await?;
    fs_err::tokio::rename(&tmp, path).await?;
    Ok(())
}
