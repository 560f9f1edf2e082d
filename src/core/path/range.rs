use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::core::openlist::FsLister;
use crate::utils::Error;

use super::split::{split_from_second_slash, SplitError};

#[derive(Error, Debug)]
pub enum RangeError {
    #[error("cannot split openlist path '{path}': {source}")]
    Split {
        path: String,
        #[source]
        source: SplitError,
    },

    #[error("openlist fs list failed: {0}")]
    Listing(String),

    #[error("openlist fs list request failed: {0}")]
    Transport(#[from] Error),

    #[error("openlist fs list timed out after {0:?}")]
    TimedOut(Duration),
}

/// Every candidate location of a translated path across OpenList's storage roots.
///
/// Nothing is cached: each `evaluate` lists the OpenList root again.
#[derive(Clone)]
pub struct Range {
    path: String,
    lister: Arc<dyn FsLister>,
    timeout: Duration,
}

impl std::fmt::Debug for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Range")
            .field("path", &self.path)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Range {
    pub fn new(path: String, lister: Arc<dyn FsLister>, timeout: Duration) -> Self {
        Self { path, lister, timeout }
    }

    /// Swap the leading segment of the path for every top-level directory.
    pub async fn evaluate(&self) -> Result<Vec<String>, RangeError> {
        let suffix = split_from_second_slash(&self.path).map_err(|source| RangeError::Split {
            path: self.path.clone(),
            source,
        })?;

        let res = tokio::time::timeout(self.timeout, self.lister.fetch_fs_list("/", None))
            .await
            .map_err(|_| RangeError::TimedOut(self.timeout))??;
        if !res.is_success() {
            return Err(RangeError::Listing(res.message));
        }

        let paths: Vec<String> = res
            .entries
            .iter()
            .filter(|e| e.is_dir)
            .map(|e| format!("/{}{}", e.name, suffix))
            .collect();
        debug!("range of '{}': {:?}", self.path, paths);
        Ok(paths)
    }
}
