//! Command-line interface module for retype.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Directory scanning and per-file detection
//! - Rename orchestration and reporting
//! - Undo operation handling

use crate::config::{Config, LOCAL_CONFIG_FILE_NAME};
use crate::detector::{Detection, FileDetector};
use crate::output::{OutputFormatter, file_word};
use crate::renamer::{FileRenamer, HISTORY_FILE_NAME, RenameLog, RenameOperation};
use crate::undo::UndoManager;
use clap::Parser;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Rename files to the extension that matches their content.
#[derive(Debug, Parser)]
#[command(name = "retype", version, about)]
pub struct Args {
    /// Directory whose files are checked (not recursive).
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Show what would be renamed without touching any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Revert the renames made by the previous run.
    #[arg(long, conflicts_with_all = ["dry_run", "deep"])]
    pub undo: bool,

    /// Examine the content of every file, even if its name already looks right.
    #[arg(long)]
    pub deep: bool,

    /// Configuration file to use instead of the default lookup.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Returns the command selected by the flags.
    pub fn command(&self) -> RenameCommand {
        if self.undo {
            RenameCommand::Undo
        } else {
            RenameCommand::Rename {
                dry_run: self.dry_run,
                deep: self.deep,
            }
        }
    }
}

/// Represents a CLI command to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameCommand {
    /// Rename files in a directory.
    Rename {
        /// If true, only report what would be renamed.
        dry_run: bool,
        /// If true, skip the name-based pre-filter.
        deep: bool,
    },
    /// Undo the previous run.
    Undo,
}

/// Options for a single directory scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Report planned renames without performing them.
    pub dry_run: bool,
    /// Examine every file's content, ignoring the name-based pre-filter.
    pub deep: bool,
    /// Explicit configuration file.
    pub config_path: Option<PathBuf>,
}

/// What happened to the files of one scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Renames that were performed, in order.
    pub renamed: Vec<RenameOperation>,
    /// Renames a dry run would perform, as (from, to).
    pub planned: Vec<(PathBuf, PathBuf)>,
    /// Files whose rename failed (or would conflict), with the reason.
    pub failures: Vec<(PathBuf, String)>,
    /// Files left alone: no suggestion, trusted by name, or already named correctly.
    pub unchanged: usize,
    /// Files whose content could not be classified (unreadable, invalid ZIP, unknown).
    pub undetected: usize,
    /// Number of files per detection description.
    pub kind_counts: HashMap<String, usize>,
}

impl ScanReport {
    /// Number of files renamed by this scan.
    pub fn renamed_count(&self) -> usize {
        self.renamed.len()
    }

    /// Total number of files that were examined.
    pub fn files_examined(&self) -> usize {
        self.kind_counts.values().sum()
    }

    /// The closing line printed after every scan.
    pub fn summary_line(&self, dry_run: bool) -> String {
        if dry_run {
            let count = self.planned.len();
            format!("{} {} would be renamed.", count, file_word(count))
        } else {
            let count = self.renamed_count();
            format!("Renamed {} {} in total.", count, file_word(count))
        }
    }
}

/// Runs the CLI application with the given command and directory path.
///
/// # Examples
///
/// ```no_run
/// use retype::cli::{run_cli, RenameCommand};
/// use std::path::Path;
///
/// let command = RenameCommand::Rename { dry_run: false, deep: false };
/// if let Err(e) = run_cli(command, Path::new("/path/to/directory")) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(command: RenameCommand, dir_path: &Path) -> Result<(), String> {
    run_cli_with_config(command, dir_path, None)
}

/// Runs the CLI application with an optional configuration file.
pub fn run_cli_with_config(
    command: RenameCommand,
    dir_path: &Path,
    config_path: Option<&Path>,
) -> Result<(), String> {
    match command {
        RenameCommand::Rename { dry_run, deep } => {
            let options = ScanOptions {
                dry_run,
                deep,
                config_path: config_path.map(Path::to_path_buf),
            };
            scan_directory(dir_path, &options).map(|_| ())
        }
        RenameCommand::Undo => undo_renames(dir_path),
    }
}

/// Scans the regular files directly inside `base_path` and renames each one
/// to the extension matching its detected kind.
///
/// Per-file failures are reported and counted but never abort the scan. Only
/// configuration errors and a failure to list the directory return `Err`.
pub fn scan_directory(base_path: &Path, options: &ScanOptions) -> Result<ScanReport, String> {
    if options.dry_run {
        OutputFormatter::dry_run_notice(&format!("Analyzing contents of: {}", base_path.display()));
    } else {
        OutputFormatter::info(&format!("Checking contents of: {}", base_path.display()));
    }

    let config = Config::load(options.config_path.as_deref(), base_path)
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let filters = config
        .compile_filters()
        .map_err(|e| format!("Error compiling filters: {}", e))?;

    let detector = if options.deep || !config.detection.trust_known_names {
        FileDetector::content_only()
    } else {
        FileDetector::default()
    };
    log::info!(
        "name pre-filter {}",
        if detector.has_prefilter() { "enabled" } else { "disabled" }
    );

    let entries = fs::read_dir(base_path)
        .map_err(|e| format!("Error reading directory {}: {}", base_path.display(), e))?;

    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        // Follows symlinks, so a link to a regular file is a candidate.
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name();
        if name == HISTORY_FILE_NAME || name == LOCAL_CONFIG_FILE_NAME {
            continue;
        }
        if filters.should_include(&path) {
            candidates.push(path);
        } else {
            log::debug!("{}: excluded by filters", path.display());
        }
    }
    candidates.sort();

    let mut report = ScanReport::default();
    let mut rename_log = RenameLog::new(base_path.to_path_buf());
    let mut planned_targets: HashSet<PathBuf> = HashSet::new();

    for path in &candidates {
        let detection = detector.detect(path);
        let count_key = match &detection {
            Detection::Trusted { .. } => "Recognized by name".to_string(),
            Detection::Classified(kind) => {
                if kind.is_failure() {
                    report.undetected += 1;
                    log::info!("{}: {}", path.display(), kind);
                }
                kind.description().to_string()
            }
        };
        *report.kind_counts.entry(count_key).or_insert(0) += 1;

        let Some(extension) = detection.suggested_extension() else {
            report.unchanged += 1;
            continue;
        };
        let kind_label = detection.kind().map(|k| k.label()).unwrap_or_default();

        if options.dry_run {
            plan_rename(path, extension, &mut planned_targets, &mut report);
            continue;
        }

        match FileRenamer::rename_with_record(path, extension, kind_label) {
            Ok(Some(operation)) => {
                OutputFormatter::success(&format!(
                    "'{}' renamed to '{}'",
                    display_name(&operation.original_path),
                    display_name(&operation.new_path)
                ));
                rename_log.add_operation(operation.clone());
                report.renamed.push(operation);
            }
            Ok(None) => report.unchanged += 1,
            Err(e) => {
                OutputFormatter::error(&format!(
                    "'{}' could not be renamed: {}",
                    display_name(path),
                    e
                ));
                report.failures.push((path.clone(), e.to_string()));
            }
        }
    }

    if !options.dry_run
        && !rename_log.operations.is_empty()
        && let Err(e) = rename_log.save(base_path)
    {
        OutputFormatter::warning(&format!("Could not save history, undo unavailable: {}", e));
    }

    if options.dry_run && !report.kind_counts.is_empty() {
        OutputFormatter::summary_table(&report.kind_counts, report.files_examined());
    }

    OutputFormatter::header(&report.summary_line(options.dry_run));

    Ok(report)
}

/// Records the rename a dry run would perform.
///
/// `planned_targets` holds the targets claimed by earlier files of the same
/// dry run, which a real run would have created by then.
fn plan_rename(
    path: &Path,
    extension: &str,
    planned_targets: &mut HashSet<PathBuf>,
    report: &mut ScanReport,
) {
    let Some(target) = FileRenamer::target_path(path, extension) else {
        report.failures.push((path.to_path_buf(), "no usable file name".to_string()));
        return;
    };

    if target == path {
        report.unchanged += 1;
    } else if target.exists() || planned_targets.contains(&target) {
        OutputFormatter::dry_run_notice(&format!(
            "'{}' cannot be renamed: '{}' already exists",
            display_name(path),
            display_name(&target)
        ));
        report
            .failures
            .push((path.to_path_buf(), format!("{} already exists", target.display())));
    } else {
        OutputFormatter::dry_run_notice(&format!(
            "'{}' would be renamed to '{}'",
            display_name(path),
            display_name(&target)
        ));
        planned_targets.insert(target.clone());
        report.planned.push((path.to_path_buf(), target));
    }
}

/// Undoes the previous run's renames and reports the outcome.
fn undo_renames(base_path: &Path) -> Result<(), String> {
    OutputFormatter::info("Undoing previous renames...");

    let report = UndoManager::undo(base_path).map_err(|e| e.to_string())?;

    OutputFormatter::success("Undo complete!");
    OutputFormatter::plain(&format!("  Processed: {}", report.total_processed()));
    OutputFormatter::plain(&format!("  Restored: {}", report.restored_files));

    if !report.skipped_files.is_empty() {
        OutputFormatter::plain(&format!("  Skipped: {}", report.skipped_files.len()));
        for (path, reason) in &report.skipped_files {
            OutputFormatter::plain(&format!("    - {}: {}", path.display(), reason));
        }
    }

    if !report.failed_restores.is_empty() {
        OutputFormatter::plain(&format!("  Failed: {}", report.failed_restores.len()));
        for (path, reason) in &report.failed_restores {
            OutputFormatter::error(&format!("{}: {}", path.display(), reason));
        }
    }

    if !report.is_complete_success() {
        OutputFormatter::warning("History file was NOT deleted; fix the issues and try again.");
    }

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["retype"]).expect("Args should parse");
        assert_eq!(args.directory, PathBuf::from("."));
        assert_eq!(
            args.command(),
            RenameCommand::Rename {
                dry_run: false,
                deep: false
            }
        );
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_args_flags() {
        let args = Args::try_parse_from(["retype", "downloads", "--dry-run", "--deep", "-vv"])
            .expect("Args should parse");
        assert_eq!(args.directory, PathBuf::from("downloads"));
        assert_eq!(
            args.command(),
            RenameCommand::Rename {
                dry_run: true,
                deep: true
            }
        );
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_args_undo() {
        let args = Args::try_parse_from(["retype", "--undo"]).expect("Args should parse");
        assert_eq!(args.command(), RenameCommand::Undo);
    }

    #[test]
    fn test_undo_conflicts_with_dry_run() {
        assert!(Args::try_parse_from(["retype", "--undo", "--dry-run"]).is_err());
    }

    #[test]
    fn test_summary_line() {
        let mut report = ScanReport::default();
        assert_eq!(report.summary_line(false), "Renamed 0 files in total.");

        report.renamed.push(RenameOperation {
            original_path: PathBuf::from("report"),
            new_path: PathBuf::from("report.pdf"),
            kind: "pdf".to_string(),
        });
        assert_eq!(report.summary_line(false), "Renamed 1 file in total.");
        assert_eq!(report.summary_line(true), "0 files would be renamed.");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/a/b/report.pdf")), "report.pdf");
    }
}
