//! Dropbox API v2 implementation of the storage contract.
//!
//! Listing goes through the RPC endpoint (`api.dropboxapi.com`, JSON body);
//! uploads go through the content endpoint (`content.dropboxapi.com`) with
//! the request parameters carried in the `Dropbox-API-Arg` header and the
//! file bytes as the octet-stream body. Uploads always use the
//! non-overwriting `add` mode with muted notifications, so a write to an
//! occupied path fails instead of clobbering it.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::contract::{ListPage, RemoteEntry, StorageClient};
use crate::error::StorageError;

const API_BASE: &str = "https://api.dropboxapi.com/2";
const CONTENT_BASE: &str = "https://content.dropboxapi.com/2";
const USER_AGENT: &str = concat!("pix-bucket/", env!("CARGO_PKG_VERSION"));

pub struct DropboxClient {
    http: reqwest::Client,
    token: String,
}

impl DropboxClient {
    pub fn new(token: String) -> Result<Self, StorageError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, token })
    }

    async fn list_rpc(&self, endpoint: &str, body: String) -> Result<ListPage, StorageError> {
        let response = self
            .http
            .post(format!("{API_BASE}/{endpoint}"))
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(endpoint, status = status.as_u16(), body = %body, "listing call failed");
            return Err(StorageError::Api { status: status.as_u16(), body });
        }

        let parsed: ListFolderResponse = response.json().await?;
        debug!(endpoint, entries = parsed.entries.len(), has_more = parsed.has_more, "listing page fetched");
        Ok(ListPage {
            entries: parsed
                .entries
                .into_iter()
                .filter_map(|e| e.path_lower)
                .map(|path_lower| RemoteEntry { path_lower })
                .collect(),
            cursor: parsed.cursor,
            has_more: parsed.has_more,
        })
    }
}

#[async_trait]
impl StorageClient for DropboxClient {
    async fn list_folder(&self, path: &str, recursive: bool) -> Result<ListPage, StorageError> {
        let body = serde_json::to_string(&ListFolderArgs { path, recursive })?;
        self.list_rpc("files/list_folder", body).await
    }

    async fn list_folder_continue(&self, cursor: &str) -> Result<ListPage, StorageError> {
        let body = serde_json::to_string(&ListContinueArgs { cursor })?;
        self.list_rpc("files/list_folder/continue", body).await
    }

    async fn upload(&self, path: &str, data: Vec<u8>) -> Result<(), StorageError> {
        let arg = serde_json::to_string(&UploadArgs {
            path,
            mode: "add",
            autorename: false,
            mute: true,
        })?;

        let response = self
            .http
            .post(format!("{CONTENT_BASE}/files/upload"))
            .bearer_auth(&self.token)
            .header("Dropbox-API-Arg", header_safe(&arg))
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(data)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            let body = response.text().await.unwrap_or_default();
            debug!(path, body = %body, "upload rejected in add mode");
            return Err(StorageError::Conflict(path.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(path, status = status.as_u16(), body = %body, "upload failed");
            return Err(StorageError::Api { status: status.as_u16(), body });
        }

        info!(path, "upload accepted");
        Ok(())
    }
}

#[derive(Serialize)]
struct ListFolderArgs<'a> {
    path: &'a str,
    recursive: bool,
}

#[derive(Serialize)]
struct ListContinueArgs<'a> {
    cursor: &'a str,
}

#[derive(Serialize)]
struct UploadArgs<'a> {
    path: &'a str,
    mode: &'a str,
    autorename: bool,
    mute: bool,
}

#[derive(Deserialize)]
struct ListFolderResponse {
    entries: Vec<ListEntry>,
    cursor: String,
    has_more: bool,
}

#[derive(Deserialize)]
struct ListEntry {
    path_lower: Option<String>,
}

/// The `Dropbox-API-Arg` header must be HTTP-header-safe JSON: every
/// non-ASCII character is replaced with its `\uXXXX` escape.
fn header_safe(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    out
}
