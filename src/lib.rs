#![doc = "pix-bucket: one-shot sync of a local image tree into a Dropbox folder."]

//! Scans a local directory for images by content signature, transcodes
//! non-JPEGs through ImageMagick, and uploads everything not already present
//! remotely, deduplicated against a snapshot of the destination folder and
//! driven with a fixed worker budget.

pub mod cli;
pub mod client;
pub mod config;
pub mod contract;
pub mod convert;
pub mod dispatch;
pub mod error;
pub mod report;
pub mod scan;
pub mod snapshot;
pub mod sync;
