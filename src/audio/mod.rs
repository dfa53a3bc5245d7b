//! Ownership of the synthesized audio artifact.
//!
//! The manager holds at most one live artifact. Installing a new one releases
//! the previous handle first, and dropping the manager releases whatever is
//! left, so repeated jobs in one session never accumulate buffers.

mod format;

pub use format::AudioFormat;

use crate::Result;
use bytes::Bytes;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

const LOCATOR_SCHEME: &str = "voice-studio://audio/";

/// Locally dereferenceable reference to an installed artifact.
///
/// A handle is only a name: it stays valid to hold after release, but
/// [`AudioResourceManager::resolve`] returns `None` for it from then on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioHandle {
    id: Uuid,
    locator: String,
    format: AudioFormat,
    len: usize,
}

impl AudioHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// `voice-studio://audio/<uuid>`, suitable for handing to a player.
    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioResourceStats {
    pub installed: u64,
    pub released: u64,
}

impl AudioResourceStats {
    /// Handles installed and not yet released; never more than one.
    pub fn live(&self) -> u64 {
        self.installed - self.released
    }
}

#[derive(Debug)]
struct LiveArtifact {
    handle: AudioHandle,
    data: Bytes,
}

#[derive(Debug, Default)]
struct Inner {
    current: Option<LiveArtifact>,
    stats: AudioResourceStats,
}

#[derive(Debug, Default)]
pub struct AudioResourceManager {
    inner: Mutex<Inner>,
}

impl AudioResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Release the current artifact (if any) and install `bytes` in its place.
    pub fn install(&self, bytes: impl Into<Bytes>, format: AudioFormat) -> AudioHandle {
        let data = bytes.into();
        let id = Uuid::new_v4();
        let handle = AudioHandle {
            id,
            locator: format!("{}{}", LOCATOR_SCHEME, id),
            format,
            len: data.len(),
        };

        let mut inner = self.lock();
        Self::release_locked(&mut inner);
        inner.current = Some(LiveArtifact {
            handle: handle.clone(),
            data,
        });
        inner.stats.installed += 1;
        debug!(locator = %handle.locator, bytes = handle.len, "audio artifact installed");
        handle
    }

    /// Free the current artifact. Returns `false` when nothing was installed.
    pub fn release(&self) -> bool {
        Self::release_locked(&mut self.lock())
    }

    fn release_locked(inner: &mut Inner) -> bool {
        match inner.current.take() {
            Some(artifact) => {
                inner.stats.released += 1;
                debug!(locator = %artifact.handle.locator, "audio artifact released");
                true
            }
            None => false,
        }
    }

    /// Dereference a handle. `None` once it has been released or superseded.
    pub fn resolve(&self, handle: &AudioHandle) -> Option<Bytes> {
        self.lock()
            .current
            .as_ref()
            .filter(|artifact| artifact.handle.id == handle.id)
            .map(|artifact| artifact.data.clone())
    }

    pub fn is_live(&self, handle: &AudioHandle) -> bool {
        self.lock()
            .current
            .as_ref()
            .is_some_and(|artifact| artifact.handle.id == handle.id)
    }

    pub fn current(&self) -> Option<AudioHandle> {
        self.lock()
            .current
            .as_ref()
            .map(|artifact| artifact.handle.clone())
    }

    pub fn stats(&self) -> AudioResourceStats {
        self.lock().stats
    }

    /// Write a live artifact's bytes to `path`.
    pub async fn save(&self, handle: &AudioHandle, path: impl AsRef<Path>) -> Result<()> {
        let data = self.resolve(handle).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("audio handle {} is no longer live", handle.locator),
            )
        })?;
        tokio::fs::write(path, &data).await?;
        Ok(())
    }
}

impl Drop for AudioResourceManager {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(|e| e.into_inner());
        Self::release_locked(inner);
    }
}
