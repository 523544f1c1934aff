//! Per-file dispatch: dedup check, read-or-convert, non-overwriting upload.

use std::path::Path;

use tracing::{info, warn};

use crate::contract::{ImageConvert, StorageClient};
use crate::error::TaskError;
use crate::scan::ImageKind;
use crate::snapshot::RemoteSnapshot;

/// Terminal classification of one file's processing.
#[derive(Debug)]
pub enum TaskOutcome {
    /// Already JPEG-encoded; raw bytes uploaded.
    UploadedCopy,
    /// Transcoded to JPEG in transit, converter output uploaded.
    UploadedConverted,
    /// The destination path was present in the snapshot; nothing written.
    SkippedDuplicate,
    /// Some step failed; the error is reported, siblings are unaffected.
    Failed(TaskError),
}

/// Derives the remote destination for a local file: the path relative to
/// the local root, appended under the remote root, with the extension
/// replaced by `.jpg`.
pub fn destination_path(remote_root: &str, local_root: &Path, file: &Path) -> String {
    let rel = file.strip_prefix(local_root).unwrap_or(file).with_extension("jpg");
    let rel = rel.to_string_lossy().replace('\\', "/");
    format!("{}/{}", remote_root.trim_end_matches('/'), rel)
}

/// Runs the decision-and-action sequence for one scanned image file.
///
/// Guarantees at most one upload attempt per destination path per run: a
/// snapshot hit short-circuits before any network write.
pub async fn dispatch<C, V>(
    client: &C,
    converter: &V,
    snapshot: &RemoteSnapshot,
    remote_root: &str,
    local_root: &Path,
    file: &Path,
    kind: &ImageKind,
) -> TaskOutcome
where
    C: StorageClient + ?Sized,
    V: ImageConvert + ?Sized,
{
    let dest = destination_path(remote_root, local_root, file);
    if snapshot.contains(&dest) {
        info!(dest = %dest, "already present, skipping");
        return TaskOutcome::SkippedDuplicate;
    }

    match transfer(client, converter, file, kind, &dest).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(file = %file.display(), error = %e, "file task failed");
            TaskOutcome::Failed(e)
        }
    }
}

async fn transfer<C, V>(
    client: &C,
    converter: &V,
    file: &Path,
    kind: &ImageKind,
    dest: &str,
) -> Result<TaskOutcome, TaskError>
where
    C: StorageClient + ?Sized,
    V: ImageConvert + ?Sized,
{
    match kind {
        ImageKind::Jpeg => {
            let data = tokio::fs::read(file).await?;
            client.upload(dest, data).await?;
            info!(dest = %dest, "finished (copied)");
            Ok(TaskOutcome::UploadedCopy)
        }
        ImageKind::Other(_) => {
            let data = converter.to_jpeg(file).await?;
            client.upload(dest, data).await?;
            info!(dest = %dest, "finished (converted)");
            Ok(TaskOutcome::UploadedConverted)
        }
    }
}
