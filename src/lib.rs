//! retype - rename files to match their real content type
//!
//! This library detects file types from binary signatures (refining ZIP
//! containers by their entry listing), maps them to canonical extensions,
//! renames files accordingly, and can undo those renames. File selection is
//! configurable via TOML configuration files.

pub mod cli;
pub mod config;
pub mod container;
pub mod detector;
pub mod extension;
pub mod file_kind;
pub mod output;
pub mod renamer;
pub mod signature;
pub mod undo;

pub use config::{CompiledFilters, Config, ConfigError};
pub use container::inspect_container;
pub use detector::{Detection, FileDetector, MimeGuessPrefilter, NamePrefilter, detect_kind};
pub use extension::suggest_extension;
pub use file_kind::{FileKind, OfficeFamily, OfficeGeneration};
pub use renamer::{FileRenamer, RenameError, RenameLog, RenameOperation};
pub use signature::classify;
pub use undo::{UndoManager, UndoReport};

pub use cli::{RenameCommand, ScanOptions, ScanReport, run_cli, scan_directory};
