//! Filesystem helpers for publishing artifacts that other processes poll.
//!
//! [`write_atomic`] stages bytes in a temporary file next to the target and renames it into
//! place, so a reader opening the target sees either the previous or the new content.
//! [`LockFile`] is a create-new marker file that keeps two writers off the same target. A
//! holder killed before it could drop the lock leaves the file behind;
//! [`LockFile::acquire_or_reclaim`] replaces such a file once it is older than a given age.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum FsError {
    /// The lock file already exists: someone else holds the target.
    #[error("lock {} is already held", path.display())]
    Locked { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| FsError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Replaces `target` with `bytes` in one rename.
///
/// The parent directory is created if missing. The staging file lives in the same directory
/// so the rename never crosses filesystems.
pub fn write_atomic(target: &Path, bytes: &[u8]) -> Result<(), FsError> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(FsError::io(dir))?;

    let mut staged = NamedTempFile::new_in(dir).map_err(FsError::io(dir))?;
    staged.write_all(bytes).map_err(FsError::io(dir))?;
    staged.as_file().sync_all().map_err(FsError::io(target))?;
    staged
        .persist(target)
        .map_err(|err| FsError::Io {
            path: target.to_path_buf(),
            source: err.error,
        })?;
    Ok(())
}

/// An exclusive marker file, removed when dropped.
#[derive(Debug)]
pub struct LockFile {
    path: PathBuf,
}

impl LockFile {
    /// Creates `path`, failing with [`FsError::Locked`] if it already exists.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self, FsError> {
        let path = path.into();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(FsError::io(dir))?;
        }
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                // holder pid, for clearing stale locks by hand
                if let Err(err) = writeln!(file, "{}", std::process::id()) {
                    warn!(path = %path.display(), error = %err, "failed to record pid in lock file");
                }
                Ok(Self { path })
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                Err(FsError::Locked { path })
            }
            Err(source) => Err(FsError::Io { path, source }),
        }
    }

    /// Like [`LockFile::acquire`], but an existing lock last modified at least `stale_after`
    /// ago is removed and taken over.
    pub fn acquire_or_reclaim(
        path: impl Into<PathBuf>,
        stale_after: Duration,
    ) -> Result<Self, FsError> {
        match Self::acquire(path) {
            Err(FsError::Locked { path }) if is_stale(&path, stale_after) => {
                warn!(path = %path.display(), ?stale_after, "reclaiming stale lock");
                match fs::remove_file(&path) {
                    Ok(()) => {}
                    // another reclaimer got there first; create_new below settles the race
                    Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                    Err(source) => return Err(FsError::Io { path, source }),
                }
                Self::acquire(path)
            }
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn is_stale(path: &Path, stale_after: Duration) -> bool {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| modified.elapsed().ok())
        .is_some_and(|age| age >= stale_after)
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %err, "failed to remove lock file");
        }
    }
}
