//! Second-level inspection of ZIP containers.
//!
//! OOXML documents are ZIP packages, so a ZIP signature alone does not say
//! whether a file is a workbook, a document, a presentation or a plain archive.
//! The inspector reads the archive's central directory and looks for the
//! marker entries each Office application writes.

use crate::file_kind::{FileKind, OfficeFamily, OfficeGeneration};
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

/// Workbook part present in every Excel OOXML package.
pub const EXCEL_WORKBOOK: &str = "xl/workbook.xml";
/// Directory holding Excel worksheet parts.
pub const EXCEL_WORKSHEETS_PREFIX: &str = "xl/worksheets/";
/// Main document part of a Word OOXML package.
pub const WORD_DOCUMENT: &str = "word/document.xml";
/// Presentation part of a PowerPoint OOXML package.
pub const POWERPOINT_PRESENTATION: &str = "ppt/presentation.xml";

/// Refines a file whose header carries the ZIP signature.
///
/// Returns [`FileKind::Unreadable`] if the file cannot be opened and
/// [`FileKind::NotAZip`] if the archive structure is invalid. Otherwise the
/// entry names decide, see [`classify_entries`].
pub fn inspect_container(path: &Path) -> FileKind {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            log::debug!("cannot open {}: {}", path.display(), e);
            return FileKind::Unreadable;
        }
    };

    let archive = match ZipArchive::new(file) {
        Ok(archive) => archive,
        Err(e) => {
            log::debug!("{} is not a valid ZIP archive: {}", path.display(), e);
            return FileKind::NotAZip;
        }
    };

    log::debug!("{}: {} archive entries", path.display(), archive.len());
    classify_entries(archive.file_names())
}

/// Decides the kind of a ZIP archive from its entry names.
///
/// Checks, first match wins:
/// 1. `xl/workbook.xml` plus at least one entry under `xl/worksheets/` -> Excel
/// 2. `word/document.xml` -> Word
/// 3. `ppt/presentation.xml` -> PowerPoint
/// 4. anything else -> [`FileKind::AmbiguousZip`]
///
/// # Examples
///
/// ```
/// use retype::container::classify_entries;
/// use retype::file_kind::{FileKind, OfficeFamily, OfficeGeneration};
///
/// let kind = classify_entries(["[Content_Types].xml", "word/document.xml"]);
/// assert_eq!(kind, FileKind::office(OfficeFamily::Word, OfficeGeneration::Ooxml));
/// assert_eq!(classify_entries(["readme.txt"]), FileKind::AmbiguousZip);
/// ```
pub fn classify_entries<I, S>(names: I) -> FileKind
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut has_workbook = false;
    let mut has_worksheet = false;
    let mut has_document = false;
    let mut has_presentation = false;

    for name in names {
        let name = name.as_ref();
        match name {
            EXCEL_WORKBOOK => has_workbook = true,
            WORD_DOCUMENT => has_document = true,
            POWERPOINT_PRESENTATION => has_presentation = true,
            _ => {}
        }
        if name.starts_with(EXCEL_WORKSHEETS_PREFIX) {
            has_worksheet = true;
        }
    }

    if has_workbook && has_worksheet {
        FileKind::office(OfficeFamily::Excel, OfficeGeneration::Ooxml)
    } else if has_document {
        FileKind::office(OfficeFamily::Word, OfficeGeneration::Ooxml)
    } else if has_presentation {
        FileKind::office(OfficeFamily::PowerPoint, OfficeGeneration::Ooxml)
    } else {
        FileKind::AmbiguousZip
    }
}
