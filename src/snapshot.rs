//! Remote-presence snapshot: the complete set of paths that already exist
//! under the destination folder, built once per run and read-only afterwards.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::contract::StorageClient;
use crate::error::SnapshotError;

/// Immutable set of case-normalized remote paths, used for dedup.
///
/// Complete and consistent as of build time; staleness under concurrent
/// external writers is an accepted limitation of the one-shot design.
#[derive(Debug)]
pub struct RemoteSnapshot {
    paths: HashSet<String>,
}

impl RemoteSnapshot {
    /// Case-insensitive membership test against the snapshot.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(&path.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Exhausts the recursive listing of `remote_root`, page by page, into a
/// [`RemoteSnapshot`].
///
/// Any page failure aborts the run: dedup requires the complete set, so a
/// partial snapshot is never returned.
pub async fn build_snapshot<C>(
    client: &C,
    remote_root: &str,
) -> Result<RemoteSnapshot, SnapshotError>
where
    C: StorageClient + ?Sized,
{
    let mut paths = HashSet::new();

    let mut page = client
        .list_folder(remote_root, true)
        .await
        .map_err(|source| SnapshotError { path: remote_root.to_string(), source })?;
    loop {
        debug!(entries = page.entries.len(), has_more = page.has_more, "listing page received");
        for entry in page.entries {
            paths.insert(entry.path_lower.to_lowercase());
        }
        if !page.has_more {
            break;
        }
        page = client
            .list_folder_continue(&page.cursor)
            .await
            .map_err(|source| SnapshotError { path: remote_root.to_string(), source })?;
    }

    info!(remote_root, paths = paths.len(), "remote snapshot built");
    Ok(RemoteSnapshot { paths })
}
