//! The seams of the sync pipeline: the remote storage client and the image
//! converter, expressed as async traits.
//!
//! Both traits are annotated for `mockall`, so tests can generate
//! deterministic mocks (`MockStorageClient`, `MockImageConvert`) instead of
//! talking to the real backend or spawning the real conversion tool. The
//! mocks are exported through the `test-export-mocks` feature so integration
//! tests outside the crate can use them too.

use std::path::Path;

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::{ConvertError, StorageError};

/// One entry of a remote folder listing, already case-normalized by the
/// backend.
#[derive(Debug, Clone)]
pub struct RemoteEntry {
    pub path_lower: String,
}

/// One page of a paginated folder listing.
///
/// `cursor` continues the listing via [`StorageClient::list_folder_continue`]
/// as long as `has_more` is set.
#[derive(Debug, Clone)]
pub struct ListPage {
    pub entries: Vec<RemoteEntry>,
    pub cursor: String,
    pub has_more: bool,
}

/// Client for the remote object-storage namespace.
///
/// Uploads use the backend's non-overwriting "add" mode with muted
/// notifications: a write to a path that already exists must fail rather
/// than silently clobber the object.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Start listing `path`, optionally recursing into subfolders.
    async fn list_folder(&self, path: &str, recursive: bool) -> Result<ListPage, StorageError>;

    /// Fetch the next page for a cursor returned by a previous listing call.
    async fn list_folder_continue(&self, cursor: &str) -> Result<ListPage, StorageError>;

    /// Write `data` to `path` in non-overwriting mode.
    async fn upload(&self, path: &str, data: Vec<u8>) -> Result<(), StorageError>;
}

/// Transcodes a local image file into JPEG bytes.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ImageConvert: Send + Sync {
    async fn to_jpeg(&self, src: &Path) -> Result<Vec<u8>, ConvertError>;
}
