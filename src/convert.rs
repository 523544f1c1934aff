//! JPEG transcoding through the external ImageMagick `convert` tool.
//!
//! The tool writes the converted image to stdout (`jpeg:-`), which is
//! captured as the upload payload. Resource ceilings are passed as
//! environment variables on the child process only; the parent environment
//! is never touched, so concurrent invocations cannot interfere with each
//! other or with the rest of the run.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::contract::ImageConvert;
use crate::error::ConvertError;

const CONVERT_TOOL: &str = "convert";
const JPEG_QUALITY: u32 = 97;

/// Per-invocation resource ceilings for the conversion tool, applied via
/// its process environment.
#[derive(Debug, Clone)]
pub struct ConvertLimits {
    /// Worker threads the tool may use per invocation.
    pub threads: u32,
    /// Heap ceiling, in ImageMagick's resource syntax (e.g. "512MiB").
    pub memory: String,
    /// Scratch directory override for intermediate pixel caches.
    pub temp_dir: Option<PathBuf>,
}

impl Default for ConvertLimits {
    fn default() -> Self {
        Self { threads: 2, memory: "512MiB".to_string(), temp_dir: None }
    }
}

impl ConvertLimits {
    /// The environment variables to set on the child process.
    pub fn child_env(&self) -> Vec<(&'static str, String)> {
        let mut env = vec![
            ("MAGICK_THREAD_LIMIT", self.threads.to_string()),
            ("MAGICK_MEMORY_LIMIT", self.memory.clone()),
        ];
        if let Some(dir) = &self.temp_dir {
            env.push(("MAGICK_TEMPORARY_PATH", dir.to_string_lossy().into_owned()));
        }
        env
    }
}

/// Invokes `convert -quality 97 <src> jpeg:-` and reads the JPEG bytes from
/// its stdout.
pub struct MagickConverter {
    program: String,
    limits: ConvertLimits,
}

impl MagickConverter {
    pub fn new(limits: ConvertLimits) -> Self {
        Self { program: CONVERT_TOOL.to_string(), limits }
    }
}

#[async_trait]
impl ImageConvert for MagickConverter {
    async fn to_jpeg(&self, src: &Path) -> Result<Vec<u8>, ConvertError> {
        debug!(src = %src.display(), tool = %self.program, "converting to jpeg");
        let output = Command::new(&self.program)
            .arg("-quality")
            .arg(JPEG_QUALITY.to_string())
            .arg(src)
            .arg("jpeg:-")
            .envs(self.limits.child_env())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ConvertError::Spawn { tool: self.program.clone(), source })?;

        if !output.status.success() {
            return Err(ConvertError::Failed {
                tool: self.program.clone(),
                status: output.status,
                path: src.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if output.stdout.is_empty() {
            return Err(ConvertError::EmptyOutput {
                tool: self.program.clone(),
                path: src.to_path_buf(),
            });
        }
        Ok(output.stdout)
    }
}
