//! File-backed session store.
//!
//! The state is written as a [`ChecksumPackage`] holding a revision counter
//! and the state itself, followed by a backup copy next to it. Loading
//! reports two integrity signals:
//!
//! - `tampered`: the primary file was missing or failed verification while
//!   a good backup existed (the backup is restored), or neither copy could
//!   be verified.
//! - `concurrent_session`: the primary file verifies but carries a revision
//!   other than the one this store last read or wrote.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::checksum::ChecksumPackage;
use crate::error::{GuardError, Result};

#[derive(Debug, Serialize, Deserialize)]
struct Record<T> {
    revision: u64,
    state: T,
}

/// Result of [`SessionStore::load`].
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    /// Stored state, or `None` when nothing usable was found.
    pub state: Option<T>,
    pub tampered: bool,
    pub concurrent_session: bool,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    backup_path: PathBuf,
    revision: Option<u64>,
}

impl SessionStore {
    /// Store at `path`; the backup lives next to it with a `.bak` suffix.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut backup = path.clone().into_os_string();
        backup.push(".bak");
        Self {
            path,
            backup_path: PathBuf::from(backup),
            revision: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Revision last read or written by this store.
    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    pub fn load<T: DeserializeOwned>(&mut self) -> Result<Loaded<T>> {
        match read_record::<T>(&self.path) {
            Ok(Some(record)) => {
                let concurrent_session = self
                    .revision
                    .is_some_and(|revision| revision != record.revision);
                if concurrent_session {
                    warn!(
                        path = %self.path.display(),
                        expected = ?self.revision,
                        found = record.revision,
                        "Session written by another process"
                    );
                }
                self.revision = Some(record.revision);
                Ok(Loaded {
                    state: Some(record.state),
                    tampered: false,
                    concurrent_session,
                })
            }
            Ok(None) => self.recover(false),
            Err(error) if error.is_integrity_failure() => {
                warn!(path = %self.path.display(), %error, "Session file failed verification");
                self.recover(true)
            }
            Err(error) => Err(error),
        }
    }

    /// Fall back to the backup after the primary was missing or invalid.
    fn recover<T: DeserializeOwned>(&mut self, primary_invalid: bool) -> Result<Loaded<T>> {
        let backup = match read_record::<T>(&self.backup_path) {
            Ok(record) => record,
            Err(error) if error.is_integrity_failure() => {
                warn!(path = %self.backup_path.display(), %error, "Backup failed verification");
                None
            }
            Err(error) => return Err(error),
        };

        let Some(record) = backup else {
            return Ok(Loaded {
                state: None,
                tampered: primary_invalid,
                concurrent_session: false,
            });
        };

        let text = fs::read_to_string(&self.backup_path).map_err(|source| GuardError::Io {
            operation: "read",
            path: self.backup_path.clone(),
            source,
        })?;
        write_atomic(&self.path, &text)?;
        warn!(path = %self.path.display(), "Session restored from backup");

        self.revision = Some(record.revision);
        Ok(Loaded {
            state: Some(record.state),
            tampered: true,
            concurrent_session: false,
        })
    }

    /// Write `state` under the next revision, then refresh the backup.
    pub fn save<T: Serialize>(&mut self, state: &T) -> Result<u64> {
        let revision = self.revision.map_or(1, |revision| revision + 1);
        let package = ChecksumPackage::seal(&Record { revision, state })?;
        let text = serde_json::to_string_pretty(&package)
            .map_err(|source| GuardError::Serialization { source })?;

        write_atomic(&self.path, &text)?;
        write_atomic(&self.backup_path, &text)?;

        self.revision = Some(revision);
        info!(path = %self.path.display(), revision, "Saved session");
        Ok(revision)
    }

    /// Delete both copies.
    pub fn clear(&mut self) -> Result<()> {
        for path in [&self.path, &self.backup_path] {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(error) if error.kind() == ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(GuardError::Io {
                        operation: "remove",
                        path: path.clone(),
                        source,
                    });
                }
            }
        }
        self.revision = None;
        info!(path = %self.path.display(), "Cleared session");
        Ok(())
    }
}

/// Read and verify a record; `Ok(None)` when the file does not exist.
fn read_record<T: DeserializeOwned>(path: &Path) -> Result<Option<Record<T>>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(GuardError::Io {
                operation: "read",
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let package: ChecksumPackage =
        serde_json::from_str(&text).map_err(|source| GuardError::Deserialization { source })?;
    package.open().map(Some)
}

/// Write through a temp file and rename over `path`.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| GuardError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    let temp_path = PathBuf::from(temp);

    let mut file = File::create(&temp_path).map_err(|source| GuardError::Io {
        operation: "create",
        path: temp_path.clone(),
        source,
    })?;
    file.write_all(contents.as_bytes())
        .map_err(|source| GuardError::Io {
            operation: "write",
            path: temp_path.clone(),
            source,
        })?;
    file.sync_all().map_err(|source| GuardError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, path).map_err(|source| GuardError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source,
    })
}
