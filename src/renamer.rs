/// Renaming of files to their detected extension.
///
/// This module computes the target name for a file (its stem plus the
/// suggested extension), performs the rename without overwriting anything,
/// and records each performed rename in a history log so that it can be undone.
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the history file written into the scanned directory.
pub const HISTORY_FILE_NAME: &str = ".retype_history.json";

/// Represents a single performed rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOperation {
    /// The path of the file before renaming.
    pub original_path: PathBuf,
    /// The path of the file after renaming.
    pub new_path: PathBuf,
    /// Label of the kind that was detected for the file.
    pub kind: String,
}

/// All renames performed by one run, persisted to enable undo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameLog {
    /// RFC 3339 timestamp of the run.
    pub timestamp: String,
    /// The directory that was scanned.
    pub base_path: PathBuf,
    /// Renames in the order they were performed.
    pub operations: Vec<RenameOperation>,
}

impl RenameLog {
    /// Creates an empty log for a given base path.
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            base_path,
            operations: Vec::new(),
        }
    }

    /// Adds an operation to this log.
    pub fn add_operation(&mut self, operation: RenameOperation) {
        self.operations.push(operation);
    }

    /// Returns the path to the history file for this base path.
    pub fn history_file_path(base_path: &Path) -> PathBuf {
        base_path.join(HISTORY_FILE_NAME)
    }

    /// Saves this log to disk in JSON format, replacing any previous history.
    pub fn save(&self, base_path: &Path) -> RenameResult<()> {
        let json_string =
            serde_json::to_string_pretty(self).map_err(|e| RenameError::HistoryWriteFailed {
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("JSON serialization failed: {}", e),
                ),
            })?;

        let history_path = Self::history_file_path(base_path);
        fs::write(&history_path, json_string)
            .map_err(|e| RenameError::HistoryWriteFailed { source: e })?;

        log::info!(
            "saved {} rename(s) to {}",
            self.operations.len(),
            history_path.display()
        );
        Ok(())
    }

    /// Loads the most recent log from disk, if one exists.
    pub fn load(base_path: &Path) -> RenameResult<Option<Self>> {
        let history_path = Self::history_file_path(base_path);

        if !history_path.exists() {
            return Ok(None);
        }

        let json_string = fs::read_to_string(&history_path)
            .map_err(|e| RenameError::HistoryReadFailed { source: e })?;

        let log =
            serde_json::from_str(&json_string).map_err(|e| RenameError::InvalidHistoryFormat {
                reason: format!("JSON parse error: {}", e),
            })?;

        Ok(Some(log))
    }

    /// Deletes the history file for a given base path.
    pub fn delete(base_path: &Path) -> RenameResult<()> {
        let history_path = Self::history_file_path(base_path);
        if history_path.exists() {
            fs::remove_file(&history_path)
                .map_err(|e| RenameError::HistoryWriteFailed { source: e })?;
        }
        Ok(())
    }
}

/// Errors that can occur while renaming files or handling their history.
#[derive(Debug)]
pub enum RenameError {
    /// The file path has no usable name component.
    InvalidFileName { path: PathBuf },
    /// Another file already occupies the target path.
    TargetExists { destination: PathBuf },
    /// The operating system rejected the rename.
    RenameFailed {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// The base directory path is invalid or doesn't exist.
    InvalidBasePath {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write history file.
    HistoryWriteFailed { source: std::io::Error },
    /// Failed to read history file.
    HistoryReadFailed { source: std::io::Error },
    /// History file has invalid format.
    InvalidHistoryFormat { reason: String },
}

impl std::fmt::Display for RenameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFileName { path } => {
                write!(f, "{} has no usable file name", path.display())
            }
            Self::TargetExists { destination } => {
                write!(f, "{} already exists", destination.display())
            }
            Self::RenameFailed {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to rename {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::InvalidBasePath { path, source } => {
                write!(f, "Invalid base path {}: {}", path.display(), source)
            }
            Self::HistoryWriteFailed { source } => {
                write!(f, "Failed to write history file: {}", source)
            }
            Self::HistoryReadFailed { source } => {
                write!(f, "Failed to read history file: {}", source)
            }
            Self::InvalidHistoryFormat { reason } => {
                write!(f, "Invalid history file format: {}", reason)
            }
        }
    }
}

impl std::error::Error for RenameError {}

/// Result type for rename operations.
pub type RenameResult<T> = Result<T, RenameError>;

/// Renames files to carry their detected extension.
pub struct FileRenamer;

impl FileRenamer {
    /// Computes the path a file should be renamed to.
    ///
    /// The new name is the file name with its last extension removed, followed
    /// by `extension` (which includes the leading dot). Leading dots of hidden
    /// files are part of the stem, so `.bashrc` becomes `.bashrc.txt` and
    /// `..notes` becomes `..notes.txt`.
    ///
    /// # Examples
    ///
    /// ```
    /// use retype::renamer::FileRenamer;
    /// use std::path::{Path, PathBuf};
    ///
    /// assert_eq!(
    ///     FileRenamer::target_path(Path::new("dir/report.dat"), ".pdf"),
    ///     Some(PathBuf::from("dir/report.pdf"))
    /// );
    /// assert_eq!(
    ///     FileRenamer::target_path(Path::new("archive.tar.gz"), ".zip"),
    ///     Some(PathBuf::from("archive.tar.zip"))
    /// );
    /// ```
    pub fn target_path(file_path: &Path, extension: &str) -> Option<PathBuf> {
        let file_name = file_path.file_name()?;
        let mut new_name = match file_name.to_str() {
            Some(name) => OsString::from(Self::strip_extension(name)),
            // Non-UTF-8 names: fall back to the platform's notion of a stem.
            None => OsString::from(file_path.file_stem()?),
        };
        new_name.push(extension);
        Some(file_path.with_file_name(new_name))
    }

    /// Removes the last extension from a file name. Leading dots never start
    /// an extension, so `..notes` and `.bashrc` are returned unchanged.
    fn strip_extension(name: &str) -> &str {
        let leading_dots = name.len() - name.trim_start_matches('.').len();
        match name[leading_dots..].rfind('.') {
            Some(dot) => &name[..leading_dots + dot],
            None => name,
        }
    }

    /// Renames a file to carry `extension` and records the operation.
    ///
    /// Returns `Ok(None)` when the file already has the target name. A file
    /// already present at the target path is never overwritten.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use retype::renamer::FileRenamer;
    /// use std::path::Path;
    ///
    /// match FileRenamer::rename_with_record(Path::new("/tmp/report"), ".pdf", "pdf") {
    ///     Ok(Some(op)) => println!("{} -> {}", op.original_path.display(), op.new_path.display()),
    ///     Ok(None) => println!("already named correctly"),
    ///     Err(e) => eprintln!("rename failed: {}", e),
    /// }
    /// ```
    pub fn rename_with_record(
        file_path: &Path,
        extension: &str,
        kind_label: &str,
    ) -> RenameResult<Option<RenameOperation>> {
        let new_path =
            Self::target_path(file_path, extension).ok_or_else(|| RenameError::InvalidFileName {
                path: file_path.to_path_buf(),
            })?;

        if new_path == file_path {
            return Ok(None);
        }

        if new_path.exists() {
            return Err(RenameError::TargetExists {
                destination: new_path,
            });
        }

        fs::rename(file_path, &new_path).map_err(|e| RenameError::RenameFailed {
            source: file_path.to_path_buf(),
            destination: new_path.clone(),
            source_error: e,
        })?;

        Ok(Some(RenameOperation {
            original_path: file_path.to_path_buf(),
            new_path,
            kind: kind_label.to_string(),
        }))
    }
}
