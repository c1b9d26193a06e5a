//! Audio store port - Interface for the scratch directory

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use domain::{AudioFormat, ScratchFileName};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for short-lived audio files shared by the speech handlers
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AudioStorePort: Send + Sync {
    /// Filesystem path of `name` inside the store
    fn path_of(&self, name: &ScratchFileName) -> PathBuf;

    /// Write `data` to `name`, creating the store directory if needed
    async fn write(&self, name: &ScratchFileName, data: &[u8]) -> Result<(), ApplicationError>;

    /// Read a stored file; `None` when it does not exist
    async fn read(&self, name: &ScratchFileName) -> Result<Option<Bytes>, ApplicationError>;

    /// Remove a stored file without awaiting, ignoring failures
    fn discard(&self, name: &ScratchFileName);

    /// Delete files older than `max_age`, optionally only those of `format`
    ///
    /// Returns the number of files removed.
    async fn sweep_older_than(
        &self,
        max_age: Duration,
        format: Option<AudioFormat>,
    ) -> Result<usize, ApplicationError>;

    /// Whether new files can currently be written
    async fn is_writable(&self) -> bool;
}

/// Owns a scratch file and deletes it when dropped
///
/// Dropping covers every way out of a handler: normal return, `?` on an
/// error, and the request future being cancelled mid-await.
pub struct ScratchGuard {
    store: Arc<dyn AudioStorePort>,
    name: ScratchFileName,
}

impl std::fmt::Debug for ScratchGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchGuard")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ScratchGuard {
    /// Take ownership of an already written file
    pub fn new(store: Arc<dyn AudioStorePort>, name: ScratchFileName) -> Self {
        Self { store, name }
    }

    /// Name of the guarded file
    #[must_use]
    pub const fn name(&self) -> &ScratchFileName {
        &self.name
    }

    /// Filesystem path of the guarded file
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.store.path_of(&self.name)
    }
}

impl Drop for ScratchGuard {
    fn drop(&mut self) {
        self.store.discard(&self.name);
    }
}
