//! Resolution of detected kinds to canonical file extensions.

use crate::file_kind::{FileKind, OfficeFamily, OfficeGeneration};

/// Returns the canonical extension for a kind, including the leading dot.
///
/// `None` is a normal outcome for kinds that carry no type information
/// (an unrefined ZIP, an invalid archive, an unreadable or unknown file);
/// callers leave such files alone.
///
/// # Examples
///
/// ```
/// use retype::extension::suggest_extension;
/// use retype::file_kind::{FileKind, OfficeFamily, OfficeGeneration};
///
/// assert_eq!(suggest_extension(FileKind::Jpeg), Some(".jpg"));
/// assert_eq!(
///     suggest_extension(FileKind::office(OfficeFamily::Word, OfficeGeneration::Legacy)),
///     Some(".doc")
/// );
/// assert_eq!(suggest_extension(FileKind::Unknown), None);
/// ```
pub fn suggest_extension(kind: FileKind) -> Option<&'static str> {
    match kind {
        FileKind::Pdf => Some(".pdf"),
        FileKind::Jpeg => Some(".jpg"),
        FileKind::Png => Some(".png"),
        FileKind::SevenZip => Some(".7z"),
        FileKind::Office { family, generation } => Some(office_extension(family, generation)),
        FileKind::AmbiguousZip => Some(".zip"),
        FileKind::PlainText => Some(".txt"),
        FileKind::Zip | FileKind::NotAZip | FileKind::Unreadable | FileKind::Unknown => None,
    }
}

fn office_extension(family: OfficeFamily, generation: OfficeGeneration) -> &'static str {
    match (family, generation) {
        (OfficeFamily::Word, OfficeGeneration::Legacy) => ".doc",
        (OfficeFamily::Word, OfficeGeneration::Ooxml) => ".docx",
        (OfficeFamily::Excel, OfficeGeneration::Legacy) => ".xls",
        (OfficeFamily::Excel, OfficeGeneration::Ooxml) => ".xlsx",
        (OfficeFamily::PowerPoint, OfficeGeneration::Legacy) => ".ppt",
        (OfficeFamily::PowerPoint, OfficeGeneration::Ooxml) => ".pptx",
    }
}

impl FileKind {
    /// Shorthand for [`suggest_extension`].
    pub fn extension(self) -> Option<&'static str> {
        suggest_extension(self)
    }
}
