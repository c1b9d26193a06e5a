//! Local audio store - Implements AudioStorePort on a directory

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use application::error::ApplicationError;
use application::ports::AudioStorePort;
use async_trait::async_trait;
use bytes::Bytes;
use domain::{AudioFormat, ScratchFileName};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Scratch directory on the local filesystem
///
/// The directory is created lazily on the first write, so a missing
/// directory is simply an empty store.
#[derive(Debug, Clone)]
pub struct LocalAudioStore {
    root: PathBuf,
}

impl LocalAudioStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn ensure_root(&self) -> Result<(), ApplicationError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            ApplicationError::Internal(format!(
                "cannot create scratch directory {}: {e}",
                self.root.display()
            ))
        })
    }
}

#[async_trait]
impl AudioStorePort for LocalAudioStore {
    fn path_of(&self, name: &ScratchFileName) -> PathBuf {
        self.root.join(name.as_str())
    }

    #[instrument(skip(self, data), fields(name = %name, size = data.len()))]
    async fn write(&self, name: &ScratchFileName, data: &[u8]) -> Result<(), ApplicationError> {
        self.ensure_root().await?;
        tokio::fs::write(self.path_of(name), data).await?;
        debug!("Scratch file written");
        Ok(())
    }

    async fn read(&self, name: &ScratchFileName) -> Result<Option<Bytes>, ApplicationError> {
        match tokio::fs::read(self.path_of(name)).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn discard(&self, name: &ScratchFileName) {
        match std::fs::remove_file(self.path_of(name)) {
            Ok(()) => debug!(name = %name, "Scratch file discarded"),
            Err(e) if e.kind() == ErrorKind::NotFound => {},
            Err(e) => warn!(name = %name, error = %e, "Failed to discard scratch file"),
        }
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn sweep_older_than(
        &self,
        max_age: Duration,
        format: Option<AudioFormat>,
    ) -> Result<usize, ApplicationError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let now = SystemTime::now();
        let mut removed = 0;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let metadata = match entry.metadata().await {
                Ok(m) if m.is_file() => m,
                _ => continue,
            };

            if let Some(wanted) = format {
                let matches = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(AudioFormat::from_extension)
                    == Some(wanted);
                if !matches {
                    continue;
                }
            }

            let age = metadata
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .unwrap_or(Duration::ZERO);
            if age < max_age {
                continue;
            }

            match tokio::fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {},
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove expired file"),
            }
        }

        if removed > 0 {
            debug!(removed, "Expired scratch files removed");
        }
        Ok(removed)
    }

    async fn is_writable(&self) -> bool {
        if self.ensure_root().await.is_err() {
            return false;
        }
        let probe = self.root.join(format!(".probe-{}", Uuid::new_v4()));
        let writable = tokio::fs::write(&probe, b"").await.is_ok();
        let _ = tokio::fs::remove_file(&probe).await;
        writable
    }
}
