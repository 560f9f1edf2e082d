pub mod range;
pub mod split;
pub mod symlink;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{EmbyConfig, PathConfig};
use crate::core::openlist::FsLister;
use crate::utils::urls;

pub use range::{Range, RangeError};
use symlink::{resolve_local_symlink, SymlinkOutcome};

/// Result of translating one Emby path.
#[derive(Debug, Clone)]
pub struct Translation {
    /// Always `true`; no stage of the pipeline rejects a path.
    #[allow(unused)]
    pub success: bool,
    /// Best-effort OpenList path.
    pub path: String,
    /// Candidates of `path` under every OpenList storage root.
    pub range: Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Original,
    UrlDecoded,
    SlashTransferred,
    SymlinkResolved,
    MountStripped,
    Emby2OpenlistMapped,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Original => "original",
            Stage::UrlDecoded => "url decoded",
            Stage::SlashTransferred => "backslashes transferred",
            Stage::SymlinkResolved => "symlink resolved",
            Stage::MountStripped => "mount path removed",
            Stage::Emby2OpenlistMapped => "emby2openlist mapping hit",
        };
        f.write_str(name)
    }
}

/// Every intermediate value a path went through, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathRoutes(Vec<(Stage, String)>);

impl PathRoutes {
    fn record(&mut self, stage: Stage, value: &str) {
        self.0.push((stage, value.to_string()));
    }

    #[allow(unused)]
    pub fn stages(&self) -> &[(Stage, String)] {
        &self.0
    }
}

impl fmt::Display for PathRoutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (stage, value) in &self.0 {
            write!(f, "\n  {stage} => {value}")?;
        }
        f.write_str("\n]")
    }
}

/// Percent-decode then unify separators.
pub fn normalize(raw: &str, routes: &mut PathRoutes) -> String {
    let decoded = urls::unescape(raw);
    routes.record(Stage::UrlDecoded, &decoded);

    let slashed = urls::transfer_slash(&decoded);
    routes.record(Stage::SlashTransferred, &slashed);
    slashed
}

/// Emby to OpenList path translation.
///
/// Holds only immutable settings and a shared listing client, so one
/// translator can serve any number of concurrent callers.
#[derive(Clone)]
pub struct Translator {
    mount_path: String,
    path: PathConfig,
    range_timeout: Duration,
    lister: Arc<dyn FsLister>,
}

impl Translator {
    pub fn new(
        emby: EmbyConfig,
        path: PathConfig,
        range_timeout: Duration,
        lister: Arc<dyn FsLister>,
    ) -> Self {
        Self {
            mount_path: emby.mount_path,
            path,
            range_timeout,
            lister,
        }
    }

    pub fn from_config(config: &crate::config::Config, lister: Arc<dyn FsLister>) -> Self {
        Self::new(
            config.emby.clone(),
            config.path.clone(),
            Duration::from_secs(config.openlist.timeout_secs),
            lister,
        )
    }

    pub async fn translate(&self, emby_path: &str) -> Translation {
        let mut routes = PathRoutes::default();
        routes.record(Stage::Original, emby_path);

        let mut emby_path = normalize(emby_path, &mut routes);

        if self.path.follow_symlink {
            let timeout = Duration::from_millis(self.path.symlink_timeout_ms);
            match resolve_local_symlink(&emby_path, timeout).await {
                SymlinkOutcome::Unchanged => {}
                SymlinkOutcome::Resolved(resolved) => {
                    emby_path = resolved;
                    routes.record(Stage::SymlinkResolved, &emby_path);
                }
                SymlinkOutcome::Failed(e) => {
                    warn!(kind = ?e.kind(), "Failed to resolve symlink, path: {}, err: {}", emby_path, e);
                }
            }
        }

        let mut openlist_path = emby_path
            .strip_prefix(self.mount_path.as_str())
            .unwrap_or(emby_path.as_str())
            .to_string();
        routes.record(Stage::MountStripped, &openlist_path);

        if let Some(mapped) = self.path.map_emby2openlist(&openlist_path) {
            openlist_path = mapped;
            routes.record(Stage::Emby2OpenlistMapped, &openlist_path);
        }
        info!("embyPath translation routes: {}", routes);

        Translation {
            success: true,
            range: Range::new(openlist_path.clone(), self.lister.clone(), self.range_timeout),
            path: openlist_path,
        }
    }
}
