//! File-based rendezvous for exchanging session descriptors.
//!
//! Each side writes `<role>.json` into a shared directory and polls for the
//! peer's file. Writes go through a temp file and a rename so the poller
//! never observes a partial descriptor.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;

use super::descriptor::SessionDescriptor;
use super::role::Role;
use crate::error::IceError;

/// Default interval between polls for the peer's descriptor.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shared-directory rendezvous between exactly two peers.
#[derive(Debug, Clone)]
pub struct FileRendezvous {
    dir: PathBuf,
    poll_interval: Duration,
}

impl FileRendezvous {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Location of the descriptor published by `role`.
    pub fn path_for(&self, role: Role) -> PathBuf {
        self.dir.join(format!("{}.json", role.as_str()))
    }

    /// Write the local descriptor to the location keyed by `role`.
    pub async fn publish(
        &self,
        descriptor: &SessionDescriptor,
        role: Role,
    ) -> Result<PathBuf, IceError> {
        let path = self.path_for(role);
        let dir = self.dir.clone();
        let target = path.clone();
        let json = descriptor.to_json()?;

        tokio::task::spawn_blocking(move || write_atomic(&dir, &target, &json))
            .await
            .map_err(|e| IceError::file_io(&path, std::io::Error::other(e)))??;

        Ok(path)
    }

    /// Poll for the peer's descriptor until it appears or `deadline` passes.
    ///
    /// A missing file is a poll miss; any other I/O error, or content that
    /// does not parse, is fatal.
    pub async fn retrieve(
        &self,
        role: Role,
        deadline: Instant,
    ) -> Result<SessionDescriptor, IceError> {
        let path = self.path_for(role.peer());
        println!("Waiting for file[{}]...", path.display());

        loop {
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    println!("File detected");
                    return SessionDescriptor::from_json(&bytes);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(IceError::file_io(&path, e)),
            }

            if Instant::now() + self.poll_interval > deadline {
                return Err(IceError::RendezvousTimedOut {
                    path: path.display().to_string(),
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

fn write_atomic(dir: &Path, target: &Path, contents: &[u8]) -> Result<(), IceError> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| IceError::file_io(dir, e))?;
    let tmp_path = tmp.path().to_path_buf();
    tmp.write_all(contents)
        .and_then(|_| tmp.flush())
        .map_err(|e| IceError::file_io(&tmp_path, e))?;
    tmp.persist(target)
        .map_err(|e| IceError::file_io(target, e.error))?;
    Ok(())
}
