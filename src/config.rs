use std::path::PathBuf;

use tracing::info;

use crate::convert::ConvertLimits;
use crate::error::ConfigError;

/// Fixed worker budget unless overridden on the command line.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Validated configuration for one sync run.
#[derive(Debug)]
pub struct SyncConfig {
    /// Absolute destination folder in the remote namespace.
    pub remote_root: String,
    /// Local directory whose tree is scanned for images.
    pub local_root: PathBuf,
    /// Maximum simultaneous per-file tasks.
    pub concurrency: usize,
    /// Resource ceilings for the conversion tool.
    pub limits: ConvertLimits,
}

impl SyncConfig {
    /// Validates the run parameters. The remote namespace wants absolute
    /// paths, and the local root must exist before any remote call is made.
    pub fn new(
        remote_root: String,
        local_root: PathBuf,
        concurrency: usize,
        limits: ConvertLimits,
    ) -> Result<Self, ConfigError> {
        if !remote_root.starts_with('/') {
            return Err(ConfigError::RelativeDestination(remote_root));
        }
        if !local_root.exists() {
            return Err(ConfigError::MissingRoot(local_root));
        }
        Ok(Self { remote_root, local_root, concurrency: concurrency.max(1), limits })
    }

    pub fn trace_loaded(&self) {
        info!(
            remote_root = %self.remote_root,
            local_root = %self.local_root.display(),
            concurrency = self.concurrency,
            "loaded sync configuration"
        );
    }
}
