//! Command-line surface and entrypoint glue. All pipeline logic lives in
//! the library modules; this is argument exposure and orchestration only.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::client::DropboxClient;
use crate::config::{SyncConfig, DEFAULT_CONCURRENCY};
use crate::convert::{ConvertLimits, MagickConverter};
use crate::sync::synchronise;

/// Sync-convert all images under a local directory into a Dropbox folder.
#[derive(Parser)]
#[clap(
    name = "pix-bucket",
    version,
    about = "Sync-convert all images in a local directory tree and upload them to a Dropbox folder as JPEGs"
)]
pub struct Cli {
    /// Destination folder in your Dropbox (absolute path)
    pub folder: String,
    /// Local directory to scan for images
    pub rootdir: PathBuf,
    /// Dropbox API access token
    pub token: String,
    /// Override the conversion tool's temporary directory
    #[clap(long, alias = "temp_dir")]
    pub temp_dir: Option<PathBuf>,
    /// Number of concurrent per-file tasks
    #[clap(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
}

/// Async CLI entrypoint, shared by `main()` and integration tests.
///
/// Fatal errors (bad arguments, snapshot construction) surface as `Err`;
/// per-file failures never do. They are printed in the final report and
/// the process still exits cleanly after draining every task.
pub async fn run(cli: Cli) -> Result<()> {
    let limits = ConvertLimits { temp_dir: cli.temp_dir, ..ConvertLimits::default() };
    let cfg = SyncConfig::new(cli.folder, cli.rootdir, cli.concurrency, limits)?;
    cfg.trace_loaded();

    let client = DropboxClient::new(cli.token)?;
    let converter = MagickConverter::new(cfg.limits.clone());

    let report = synchronise(&cfg, &client, &converter).await?;
    print!("{report}");
    Ok(())
}
