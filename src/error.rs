use std::path::PathBuf;

use thiserror::Error;

/// Rejected command-line configuration. Fatal before any work starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("remote destination must be an absolute path, got '{0}'")]
    RelativeDestination(String),
    #[error("local source directory does not exist: {0}")]
    MissingRoot(PathBuf),
}

/// Transport- or API-level failure from the storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("encoding API arguments: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("an object already exists at {0}")]
    Conflict(String),
}

/// The remote listing failed while building the presence snapshot.
///
/// Always fatal: dedup correctness depends on a complete snapshot, so no
/// partial set of pages is usable.
#[derive(Debug, Error)]
#[error("listing '{path}' failed: {source}")]
pub struct SnapshotError {
    pub path: String,
    #[source]
    pub source: StorageError,
}

/// The external conversion tool failed to produce JPEG output.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to launch '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{tool}' exited with {status} for {path}: {stderr}")]
    Failed {
        tool: String,
        status: std::process::ExitStatus,
        path: PathBuf,
        stderr: String,
    },
    #[error("'{tool}' produced no output for {path}")]
    EmptyOutput { tool: String, path: PathBuf },
}

/// Why a single file's dispatch failed. Recovered at the task boundary and
/// reported; never propagated to sibling tasks.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("reading local file: {0}")]
    Read(#[from] std::io::Error),
    #[error("converting to jpeg: {0}")]
    Convert(#[from] ConvertError),
    #[error("uploading: {0}")]
    Upload(#[from] StorageError),
}
