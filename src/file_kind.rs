/// Detected file kinds.
///
/// A [`FileKind`] is the single value that flows from content detection to
/// extension resolution. Office documents carry their family and container
/// generation as separate fields so no caller ever has to inspect a label
/// string to tell `.doc` from `.docx`.
///
/// # Examples
///
/// ```
/// use retype::file_kind::{FileKind, OfficeFamily, OfficeGeneration};
///
/// let kind = FileKind::office(OfficeFamily::Word, OfficeGeneration::Ooxml);
/// assert_eq!(kind.label(), "word-ooxml");
/// assert!(!kind.is_failure());
/// ```
use std::fmt;

/// Office application family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfficeFamily {
    /// Microsoft Word documents
    Word,
    /// Microsoft Excel workbooks
    Excel,
    /// Microsoft PowerPoint presentations
    PowerPoint,
}

/// Container generation of an Office document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfficeGeneration {
    /// Legacy compound-file binary format (.doc, .xls, .ppt)
    Legacy,
    /// Office Open XML, a ZIP package (.docx, .xlsx, .pptx)
    Ooxml,
}

/// The closed set of kinds the detector can assign to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// PDF document
    Pdf,
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// ZIP signature seen in the header, not yet refined by the container inspector
    Zip,
    /// 7-Zip archive
    SevenZip,
    /// Microsoft Office document of a given family and generation
    Office {
        family: OfficeFamily,
        generation: OfficeGeneration,
    },
    /// Printable text
    PlainText,
    /// Valid ZIP archive that matches no known document layout
    AmbiguousZip,
    /// ZIP signature in the header but the archive structure is invalid
    NotAZip,
    /// The file could not be opened or read
    Unreadable,
    /// No signature or heuristic matched
    Unknown,
}

impl FileKind {
    /// Shorthand for constructing an [`FileKind::Office`] variant.
    pub const fn office(family: OfficeFamily, generation: OfficeGeneration) -> Self {
        FileKind::Office { family, generation }
    }

    /// Returns a stable, machine-friendly label, used in history files.
    pub fn label(&self) -> &'static str {
        use OfficeFamily::*;
        use OfficeGeneration::*;
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Jpeg => "jpeg",
            FileKind::Png => "png",
            FileKind::Zip => "zip",
            FileKind::SevenZip => "7z",
            FileKind::Office { family, generation } => match (family, generation) {
                (Word, Legacy) => "word-legacy",
                (Word, Ooxml) => "word-ooxml",
                (Excel, Legacy) => "excel-legacy",
                (Excel, Ooxml) => "excel-ooxml",
                (PowerPoint, Legacy) => "powerpoint-legacy",
                (PowerPoint, Ooxml) => "powerpoint-ooxml",
            },
            FileKind::PlainText => "text",
            FileKind::AmbiguousZip => "zip-ambiguous",
            FileKind::NotAZip => "not-a-zip",
            FileKind::Unreadable => "unreadable",
            FileKind::Unknown => "unknown",
        }
    }

    /// Returns a human-readable description of this kind.
    pub fn description(&self) -> &'static str {
        use OfficeFamily::*;
        use OfficeGeneration::*;
        match self {
            FileKind::Pdf => "PDF document",
            FileKind::Jpeg => "JPEG image",
            FileKind::Png => "PNG image",
            FileKind::Zip => "ZIP archive",
            FileKind::SevenZip => "7-Zip archive",
            FileKind::Office { family, generation } => match (family, generation) {
                (Word, Legacy) => "Microsoft Word document (.doc)",
                (Word, Ooxml) => "Microsoft Word document (.docx)",
                (Excel, Legacy) => "Microsoft Excel workbook (.xls)",
                (Excel, Ooxml) => "Microsoft Excel workbook (.xlsx)",
                (PowerPoint, Legacy) => "Microsoft PowerPoint presentation (.ppt)",
                (PowerPoint, Ooxml) => "Microsoft PowerPoint presentation (.pptx)",
            },
            FileKind::PlainText => "Plain text",
            FileKind::AmbiguousZip => "ZIP archive with unrecognized contents",
            FileKind::NotAZip => "Not a valid ZIP archive",
            FileKind::Unreadable => "Unreadable file",
            FileKind::Unknown => "Unknown type",
        }
    }

    /// Returns true for kinds that record a detection failure rather than a type.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            FileKind::NotAZip | FileKind::Unreadable | FileKind::Unknown
        )
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
