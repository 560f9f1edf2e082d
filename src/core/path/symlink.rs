use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymlinkErrorKind {
    Cyclic,
    TargetMissing,
    Other,
}

#[derive(Error, Debug)]
pub enum SymlinkError {
    #[error("symlink loop detected: {0}")]
    Cyclic(#[source] io::Error),

    #[error("symlink target does not exist: {0}")]
    TargetMissing(#[source] io::Error),

    #[error("failed to resolve symlink: {0}")]
    Other(#[source] io::Error),
}

impl SymlinkError {
    pub fn kind(&self) -> SymlinkErrorKind {
        match self {
            SymlinkError::Cyclic(_) => SymlinkErrorKind::Cyclic,
            SymlinkError::TargetMissing(_) => SymlinkErrorKind::TargetMissing,
            SymlinkError::Other(_) => SymlinkErrorKind::Other,
        }
    }

    fn classify(err: io::Error) -> Self {
        if is_loop(&err) {
            SymlinkError::Cyclic(err)
        } else if err.kind() == io::ErrorKind::NotFound {
            SymlinkError::TargetMissing(err)
        } else {
            SymlinkError::Other(err)
        }
    }
}

#[cfg(unix)]
fn is_loop(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::ELOOP)
}

#[cfg(not(unix))]
fn is_loop(_err: &io::Error) -> bool {
    false
}

#[derive(Debug)]
pub enum SymlinkOutcome {
    Unchanged,
    Resolved(String),
    Failed(SymlinkError),
}

/// Resolve `path` to its canonical, symlink-free form on the local filesystem.
pub async fn resolve_local_symlink(path: &str, timeout: Duration) -> SymlinkOutcome {
    if path.trim().is_empty() {
        return SymlinkOutcome::Unchanged;
    }

    let resolved = match tokio::time::timeout(timeout, canonicalize(path)).await {
        Ok(Ok(p)) => p,
        Ok(Err(e)) => return SymlinkOutcome::Failed(SymlinkError::classify(e)),
        Err(_) => {
            return SymlinkOutcome::Failed(SymlinkError::Other(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("resolution took longer than {timeout:?}"),
            )))
        }
    };

    let resolved = match resolved.into_os_string().into_string() {
        Ok(s) => s,
        Err(raw) => {
            return SymlinkOutcome::Failed(SymlinkError::Other(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("resolved path is not valid UTF-8: {}", raw.to_string_lossy()),
            )))
        }
    };

    if resolved == path {
        SymlinkOutcome::Unchanged
    } else {
        SymlinkOutcome::Resolved(resolved)
    }
}

/// Canonicalize `path`, keeping a relative input relative to the working
/// directory when its target stays under it.
async fn canonicalize(path: &str) -> io::Result<PathBuf> {
    let resolved = tokio::fs::canonicalize(path).await?;
    if Path::new(path).is_absolute() {
        return Ok(resolved);
    }

    let cwd = tokio::fs::canonicalize(".").await?;
    match resolved.strip_prefix(&cwd) {
        Ok(rel) if rel.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Ok(rel) => Ok(rel.to_path_buf()),
        Err(_) => Ok(resolved),
    }
}
