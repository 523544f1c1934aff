//! Recursive scan of the local tree, classifying files by content signature.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::debug;
use walkdir::WalkDir;

/// Bytes of file prefix handed to the signature sniffer. Every format the
/// sniffer recognises declares itself well within this window.
const SNIFF_BYTES: usize = 64;

/// The sniffed type of a local image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Other(ImageFormat),
}

/// One classified entry of the local tree walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEntry {
    Image { path: PathBuf, kind: ImageKind },
    NonImage(PathBuf),
}

/// Lazily walks every regular file under `root`, classifying each by its
/// content signature, never by extension.
///
/// Directories and symlinks to non-files are excluded entirely. Regular
/// files whose content does not sniff as a known image format (including
/// zero-byte and unreadable files) come out as [`ScanEntry::NonImage`].
pub fn scan_tree(root: &Path) -> impl Iterator<Item = ScanEntry> + '_ {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| classify(entry.path()))
}

fn classify(path: &Path) -> ScanEntry {
    match sniff(path) {
        Some(kind) => {
            debug!(path = %path.display(), kind = ?kind, "classified image file");
            ScanEntry::Image { path: path.to_path_buf(), kind }
        }
        None => ScanEntry::NonImage(path.to_path_buf()),
    }
}

fn sniff(path: &Path) -> Option<ImageKind> {
    let mut file = File::open(path).ok()?;
    let mut buf = [0u8; SNIFF_BYTES];
    let mut len = 0;
    while len < buf.len() {
        match file.read(&mut buf[len..]) {
            Ok(0) => break,
            Ok(n) => len += n,
            Err(_) => return None,
        }
    }
    match image::guess_format(&buf[..len]) {
        Ok(ImageFormat::Jpeg) => Some(ImageKind::Jpeg),
        Ok(format) => Some(ImageKind::Other(format)),
        Err(_) => None,
    }
}
