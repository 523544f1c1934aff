//! Top-level orchestration of one sync run.
//!
//! Order of operations:
//!   1. Build the complete remote-presence snapshot. This is a strict
//!      barrier: dedup correctness depends on it, so a listing failure is
//!      fatal.
//!   2. Drive the scanner's lazy sequence through per-file dispatch with a
//!      fixed worker budget. Tasks are independent; a failing task becomes a
//!      `Failed` record and never aborts its siblings.
//!   3. Fold all records into a [`SyncReport`] once everything has drained.
//!
//! Generic over the [`StorageClient`] and [`ImageConvert`] contracts so the
//! whole run can execute against mocks in tests.

use futures::stream::{self, StreamExt};
use tracing::info;

use crate::config::SyncConfig;
use crate::contract::{ImageConvert, StorageClient};
use crate::dispatch::dispatch;
use crate::error::SnapshotError;
use crate::report::{FileRecord, SyncReport};
use crate::scan::{scan_tree, ScanEntry};
use crate::snapshot::build_snapshot;

pub async fn synchronise<C, V>(
    cfg: &SyncConfig,
    client: &C,
    converter: &V,
) -> Result<SyncReport, SnapshotError>
where
    C: StorageClient,
    V: ImageConvert,
{
    info!(
        remote_root = %cfg.remote_root,
        local_root = %cfg.local_root.display(),
        "starting synchronisation"
    );

    let snapshot = build_snapshot(client, &cfg.remote_root).await?;
    let snapshot = &snapshot;

    let records: Vec<FileRecord> = stream::iter(scan_tree(&cfg.local_root))
        .map(|entry| async move {
            match entry {
                ScanEntry::NonImage(path) => FileRecord::NonImage(path),
                ScanEntry::Image { path, kind } => {
                    let outcome = dispatch(
                        client,
                        converter,
                        snapshot,
                        &cfg.remote_root,
                        &cfg.local_root,
                        &path,
                        &kind,
                    )
                    .await;
                    FileRecord::Task { path, outcome }
                }
            }
        })
        .buffer_unordered(cfg.concurrency)
        .collect()
        .await;

    let report = SyncReport::from_records(records);
    info!(
        uploaded = report.uploaded(),
        duplicates = report.duplicates,
        skipped = report.skipped.len(),
        excepted = report.excepted.len(),
        "synchronisation drained"
    );
    Ok(report)
}
