//! Per-file detection pipeline.
//!
//! A [`FileDetector`] optionally consults a name-based [`NamePrefilter`]
//! first. Files the pre-filter recognizes are trusted as they are named; the
//! rest go through header classification and, for ZIP signatures, container
//! inspection.

use crate::container::inspect_container;
use crate::file_kind::FileKind;
use crate::signature::{classify, read_header};
use std::path::Path;

/// A name-based type lookup consulted before content detection.
pub trait NamePrefilter {
    /// Returns a MIME type if the file name alone identifies the file.
    fn lookup(&self, path: &Path) -> Option<String>;
}

/// Pre-filter backed by the `mime_guess` extension database.
#[derive(Debug, Clone, Copy, Default)]
pub struct MimeGuessPrefilter;

impl NamePrefilter for MimeGuessPrefilter {
    fn lookup(&self, path: &Path) -> Option<String> {
        mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string())
    }
}

/// Outcome of detecting a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// The pre-filter recognized the file name; its content was not examined.
    Trusted {
        /// MIME type reported by the pre-filter.
        mime: String,
    },
    /// The content detector assigned a kind.
    Classified(FileKind),
}

impl Detection {
    /// Returns the detected kind, if content detection ran.
    pub fn kind(&self) -> Option<FileKind> {
        match self {
            Detection::Trusted { .. } => None,
            Detection::Classified(kind) => Some(*kind),
        }
    }

    /// Returns the extension a file with this detection should carry.
    pub fn suggested_extension(&self) -> Option<&'static str> {
        self.kind().and_then(FileKind::extension)
    }
}

/// Detects file kinds, optionally behind a name-based pre-filter.
pub struct FileDetector {
    prefilter: Option<Box<dyn NamePrefilter>>,
}

impl FileDetector {
    /// Creates a detector with the given pre-filter.
    pub fn new(prefilter: Option<Box<dyn NamePrefilter>>) -> Self {
        Self { prefilter }
    }

    /// Creates a detector that always examines file content.
    pub fn content_only() -> Self {
        Self::new(None)
    }

    /// Returns true if a pre-filter is wired in front of content detection.
    pub fn has_prefilter(&self) -> bool {
        self.prefilter.is_some()
    }

    /// Detects a single file, consulting the pre-filter first.
    pub fn detect(&self, path: &Path) -> Detection {
        if let Some(prefilter) = &self.prefilter
            && let Some(mime) = prefilter.lookup(path)
        {
            log::debug!("{}: name lookup gives {}, skipping content", path.display(), mime);
            return Detection::Trusted { mime };
        }

        Detection::Classified(detect_kind(path))
    }
}

impl Default for FileDetector {
    fn default() -> Self {
        Self::new(Some(Box::new(MimeGuessPrefilter)))
    }
}

/// Content-only detection: header signature, then container refinement.
pub fn detect_kind(path: &Path) -> FileKind {
    let header = read_header(path);
    let kind = classify(header.as_deref());

    let kind = if kind == FileKind::Zip {
        inspect_container(path)
    } else {
        kind
    };

    log::debug!("{}: detected {}", path.display(), kind.label());
    kind
}
