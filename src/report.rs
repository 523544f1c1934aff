//! Run report: skip and failure accumulation, folded from per-file records
//! at a single collection point after all tasks resolve.

use std::fmt;
use std::path::PathBuf;

use crate::dispatch::TaskOutcome;
use crate::error::TaskError;

/// The terminal record for one scanned file, as collected from the
/// concurrency controller in completion order.
#[derive(Debug)]
pub enum FileRecord {
    /// Did not sniff as an image; never entered dispatch.
    NonImage(PathBuf),
    /// Went through dispatch and ended in `outcome`.
    Task { path: PathBuf, outcome: TaskOutcome },
}

/// Aggregated outcome of a full run.
///
/// List order reflects completion order of concurrent tasks and is not
/// guaranteed.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub copied: usize,
    pub converted: usize,
    pub duplicates: usize,
    pub skipped: Vec<PathBuf>,
    pub excepted: Vec<(PathBuf, TaskError)>,
}

impl SyncReport {
    pub fn from_records(records: Vec<FileRecord>) -> Self {
        let mut report = Self::default();
        for record in records {
            report.record(record);
        }
        report
    }

    fn record(&mut self, record: FileRecord) {
        match record {
            FileRecord::NonImage(path) => self.skipped.push(path),
            FileRecord::Task { outcome: TaskOutcome::UploadedCopy, .. } => self.copied += 1,
            FileRecord::Task { outcome: TaskOutcome::UploadedConverted, .. } => {
                self.converted += 1
            }
            FileRecord::Task { outcome: TaskOutcome::SkippedDuplicate, .. } => {
                self.duplicates += 1
            }
            FileRecord::Task { path, outcome: TaskOutcome::Failed(error) } => {
                self.excepted.push((path, error))
            }
        }
    }

    pub fn uploaded(&self) -> usize {
        self.copied + self.converted
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Finished uploading all files.")?;
        writeln!(
            f,
            "Uploaded {} files ({} copied, {} converted), {} already present.",
            self.uploaded(),
            self.copied,
            self.converted,
            self.duplicates
        )?;
        writeln!(f, "Skipped the following:")?;
        for path in &self.skipped {
            writeln!(f, "{}", path.display())?;
        }
        writeln!(f, "The following generated exceptions:")?;
        for (path, error) in &self.excepted {
            writeln!(f, "{}: {}", path.display(), error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use std::path::Path;

    #[test]
    fn records_fold_into_counts_and_lists() {
        let records = vec![
            FileRecord::NonImage(PathBuf::from("/pics/notes.txt")),
            FileRecord::Task {
                path: PathBuf::from("/pics/a.jpg"),
                outcome: TaskOutcome::UploadedCopy,
            },
            FileRecord::Task {
                path: PathBuf::from("/pics/b.png"),
                outcome: TaskOutcome::UploadedConverted,
            },
            FileRecord::Task {
                path: PathBuf::from("/pics/c.png"),
                outcome: TaskOutcome::SkippedDuplicate,
            },
            FileRecord::Task {
                path: PathBuf::from("/pics/d.png"),
                outcome: TaskOutcome::Failed(
                    ConvertError::EmptyOutput {
                        tool: "convert".to_string(),
                        path: PathBuf::from("/pics/d.png"),
                    }
                    .into(),
                ),
            },
        ];

        let report = SyncReport::from_records(records);
        assert_eq!(report.copied, 1);
        assert_eq!(report.converted, 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.uploaded(), 2);
        assert_eq!(report.skipped, vec![PathBuf::from("/pics/notes.txt")]);
        assert_eq!(report.excepted.len(), 1);
        assert_eq!(report.excepted[0].0, Path::new("/pics/d.png"));
    }

    #[test]
    fn report_always_prints_completion_marker_and_both_lists() {
        let rendered = SyncReport::default().to_string();
        assert!(rendered.contains("Finished uploading all files."));
        assert!(rendered.contains("Skipped the following:"));
        assert!(rendered.contains("The following generated exceptions:"));
    }
}
