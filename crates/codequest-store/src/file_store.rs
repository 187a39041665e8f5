//! JSON-file implementation of the `ProgressStore` trait.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use codequest_core::error::DomainError;
use codequest_core::store::ProgressStore;
use codequest_core::tier::Tier;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::schema::{PROGRESS_SCHEMA_VERSION, ProgressDocument};

/// Failures local to the file store.
#[derive(Debug, Error)]
enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("corrupt progress document {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("progress document {path} has unsupported version {version}")]
    UnsupportedVersion { path: PathBuf, version: u32 },
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        Self::Infrastructure(err.to_string())
    }
}

/// Progress store persisted as a single JSON document.
///
/// Mutations are read-modify-write under an async mutex and land on disk via
/// write-to-temporary, `fsync`, rename, and a directory `fsync` before the
/// call returns. A failed write leaves no temporary file behind.
#[derive(Debug)]
pub struct JsonFileProgressStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileProgressStore {
    /// Creates a store backed by the document at `path`. The file is created
    /// on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("progress"), ToOwned::to_owned);
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_document(&self) -> Result<ProgressDocument, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no progress document yet");
                return Ok(ProgressDocument::default());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let document: ProgressDocument =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        if document.version > PROGRESS_SCHEMA_VERSION {
            return Err(StoreError::UnsupportedVersion {
                path: self.path.clone(),
                version: document.version,
            });
        }
        Ok(document)
    }

    async fn write_document(&self, document: &ProgressDocument) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        let bytes = serde_json::to_vec_pretty(document).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;

        let temp = self.temp_path();
        if let Err(source) = replace_file(&temp, &self.path, &bytes).await {
            warn!(path = %temp.display(), error = %source, "failed to replace progress document");
            match tokio::fs::remove_file(&temp).await {
                Err(e) if e.kind() != ErrorKind::NotFound => {
                    warn!(path = %temp.display(), error = %e, "failed to remove temporary document");
                }
                _ => {}
            }
            return Err(write_err(source));
        }
        sync_dir(parent).await.map_err(write_err)
    }
}

/// Writes `bytes` to `temp`, flushes it to disk, and renames it over
/// `target`.
async fn replace_file(temp: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(temp).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);
    tokio::fs::rename(temp, target).await
}

/// Makes a completed rename durable.
#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    tokio::fs::File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

#[async_trait]
impl ProgressStore for JsonFileProgressStore {
    async fn load_tier(&self, topic_id: &str) -> Result<Option<Tier>, DomainError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_document().await?.topics.get(topic_id).copied())
    }

    async fn save_tier(&self, topic_id: &str, tier: Tier) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        document.topics.insert(topic_id.to_owned(), tier);
        self.write_document(&document).await?;
        Ok(())
    }

    async fn load_completed(&self) -> Result<BTreeSet<String>, DomainError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_document().await?.completed)
    }

    async fn insert_completed(&self, problem_id: &str) -> Result<bool, DomainError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        if !document.completed.insert(problem_id.to_owned()) {
            return Ok(false);
        }
        self.write_document(&document).await?;
        Ok(true)
    }
}
