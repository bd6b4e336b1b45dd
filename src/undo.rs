/// Undo support for reverting the renames of the last run.
///
/// Renamed files are moved back to their original names based on the
/// history log written by the scan.
use crate::renamer::{RenameError, RenameLog, RenameOperation, RenameResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Represents the result of an undo operation.
#[derive(Debug, Default)]
pub struct UndoReport {
    /// Number of files successfully restored.
    pub restored_files: usize,
    /// Files that failed to restore, with the reason.
    pub failed_restores: Vec<(PathBuf, String)>,
    /// Files that were skipped because they were no longer where the log expected them.
    pub skipped_files: Vec<(PathBuf, String)>,
}

impl UndoReport {
    /// Returns the total number of operations processed.
    pub fn total_processed(&self) -> usize {
        self.restored_files + self.failed_restores.len() + self.skipped_files.len()
    }

    /// Returns true if every recorded rename was reverted.
    pub fn is_complete_success(&self) -> bool {
        self.failed_restores.is_empty() && self.skipped_files.is_empty()
    }
}

/// Why a single restore did not happen.
enum RestoreFailure {
    Missing(PathBuf, String),
    Failed(PathBuf, String),
}

/// Manages undo operations for renames.
pub struct UndoManager;

impl UndoManager {
    /// Reverts the renames recorded by the most recent run in `base_path`.
    ///
    /// Operations are replayed in reverse order. A renamed file that no longer
    /// exists is skipped. If another file now occupies the original name, it is
    /// moved aside to `<name>.bak.<timestamp>` first. The history file is
    /// removed only when every rename was reverted.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use retype::undo::UndoManager;
    /// use std::path::Path;
    ///
    /// match UndoManager::undo(Path::new("/path/to/directory")) {
    ///     Ok(report) => println!("Restored {} files", report.restored_files),
    ///     Err(e) => eprintln!("Undo failed: {}", e),
    /// }
    /// ```
    pub fn undo(base_path: &Path) -> RenameResult<UndoReport> {
        if !base_path.exists() {
            return Err(RenameError::InvalidBasePath {
                path: base_path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "base path does not exist",
                ),
            });
        }

        let log = RenameLog::load(base_path)?.ok_or_else(|| RenameError::InvalidHistoryFormat {
            reason: "No previous rename found to undo".to_string(),
        })?;

        let mut report = UndoReport::default();
        for operation in log.operations.iter().rev() {
            match Self::restore_file(operation) {
                Ok(()) => report.restored_files += 1,
                Err(RestoreFailure::Missing(path, reason)) => {
                    report.skipped_files.push((path, reason))
                }
                Err(RestoreFailure::Failed(path, reason)) => {
                    report.failed_restores.push((path, reason))
                }
            }
        }

        if report.is_complete_success()
            && let Err(e) = RenameLog::delete(base_path)
        {
            log::warn!("could not delete history file: {}", e);
        }

        Ok(report)
    }

    /// Restores a single file to its original name.
    fn restore_file(operation: &RenameOperation) -> Result<(), RestoreFailure> {
        if !operation.new_path.exists() {
            return Err(RestoreFailure::Missing(
                operation.new_path.clone(),
                "File not found at expected location".to_string(),
            ));
        }

        if operation.original_path.exists() {
            let backup_path = Self::generate_backup_path(&operation.original_path);
            fs::rename(&operation.original_path, &backup_path).map_err(|e| {
                RestoreFailure::Failed(
                    operation.original_path.clone(),
                    format!("Could not backup conflicting file: {}", e),
                )
            })?;
            log::info!(
                "moved conflicting {} to {}",
                operation.original_path.display(),
                backup_path.display()
            );
        }

        fs::rename(&operation.new_path, &operation.original_path).map_err(|e| {
            RestoreFailure::Failed(
                operation.new_path.clone(),
                format!("Failed to restore file: {}", e),
            )
        })
    }

    /// Generates a backup path for a file by appending a timestamp.
    ///
    /// Example: `notes` becomes `notes.bak.20251109-143052`
    fn generate_backup_path(original_path: &Path) -> PathBuf {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let filename = original_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());

        original_path.with_file_name(format!("{}.bak.{}", filename, timestamp))
    }
}
