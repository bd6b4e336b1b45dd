//! Signature-based classification of file headers.
//!
//! The classifier looks only at a bounded prefix of a file. Binary signatures
//! are checked in a fixed priority order, the first match wins, and headers
//! that match nothing fall back to a printable-text heuristic.

use crate::file_kind::{FileKind, OfficeFamily, OfficeGeneration};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Maximum number of bytes read from the start of a file.
pub const HEADER_LEN: usize = 512;

/// Number of leading bytes the plain-text heuristic examines.
pub const TEXT_SAMPLE_LEN: usize = 100;

/// A single magic-byte rule.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    /// Short name of the rule, for logs and tests.
    pub name: &'static str,
    /// Bytes the header must start with.
    pub magic: &'static [u8],
    /// Kind assigned when the rule matches.
    pub kind: FileKind,
}

impl Signature {
    /// Returns true if `header` starts with this signature's magic bytes.
    pub fn matches(&self, header: &[u8]) -> bool {
        header.starts_with(self.magic)
    }
}

/// Binary signatures in priority order.
///
/// The compound-file signature is shared by every legacy Office binary
/// format, but is reported as a Word document.
pub const SIGNATURES: &[Signature] = &[
    Signature {
        name: "pdf",
        magic: b"%PDF",
        kind: FileKind::Pdf,
    },
    Signature {
        name: "jpeg",
        magic: &[0xFF, 0xD8, 0xFF],
        kind: FileKind::Jpeg,
    },
    Signature {
        name: "png",
        magic: &[0x89, 0x50, 0x4E, 0x47],
        kind: FileKind::Png,
    },
    Signature {
        name: "zip",
        magic: &[0x50, 0x4B, 0x03, 0x04],
        kind: FileKind::Zip,
    },
    Signature {
        name: "7z",
        magic: &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C],
        kind: FileKind::SevenZip,
    },
    Signature {
        name: "compound-file",
        magic: &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1],
        kind: FileKind::office(OfficeFamily::Word, OfficeGeneration::Legacy),
    },
];

/// Classifies a header prefix.
///
/// `None` means the source could not be read. An empty header is treated
/// the same way, since nothing was read from it.
///
/// # Examples
///
/// ```
/// use retype::file_kind::FileKind;
/// use retype::signature::classify;
///
/// assert_eq!(classify(Some(b"%PDF-1.7\n")), FileKind::Pdf);
/// assert_eq!(classify(Some(b"hello world\n")), FileKind::PlainText);
/// assert_eq!(classify(None), FileKind::Unreadable);
/// ```
pub fn classify(header: Option<&[u8]>) -> FileKind {
    let header = match header {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return FileKind::Unreadable,
    };

    if let Some(signature) = SIGNATURES.iter().find(|sig| sig.matches(header)) {
        return signature.kind;
    }

    if is_plain_text(header) {
        FileKind::PlainText
    } else {
        FileKind::Unknown
    }
}

/// Returns true if the first [`TEXT_SAMPLE_LEN`] bytes are printable ASCII,
/// tab, line feed or carriage return.
pub fn is_plain_text(header: &[u8]) -> bool {
    header
        .iter()
        .take(TEXT_SAMPLE_LEN)
        .all(|&b| (32..=126).contains(&b) || matches!(b, 9 | 10 | 13))
}

/// Reads up to [`HEADER_LEN`] bytes from the start of a file.
///
/// Any open or read failure yields `None`. The file handle is closed before
/// this function returns.
pub fn read_header(path: &Path) -> Option<Vec<u8>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            log::debug!("cannot open {}: {}", path.display(), e);
            return None;
        }
    };

    let mut header = Vec::with_capacity(HEADER_LEN);
    match file.take(HEADER_LEN as u64).read_to_end(&mut header) {
        Ok(_) => Some(header),
        Err(e) => {
            log::debug!("cannot read {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_each_signature_ignores_trailing_bytes() {
        for signature in SIGNATURES {
            let mut header = signature.magic.to_vec();
            header.extend_from_slice(&[0x00, 0xFF, 0x13, 0x37]);
            assert_eq!(
                classify(Some(&header)),
                signature.kind,
                "signature {} should match",
                signature.name
            );
        }
    }

    #[test]
    fn test_exact_magic_is_enough() {
        assert_eq!(classify(Some(b"%PDF")), FileKind::Pdf);
        assert_eq!(classify(Some(&[0xFF, 0xD8, 0xFF])), FileKind::Jpeg);
        assert_eq!(classify(Some(&[0x50, 0x4B, 0x03, 0x04])), FileKind::Zip);
    }

    #[test]
    fn test_legacy_compound_file_is_word() {
        let header = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0x00, 0x00];
        assert_eq!(
            classify(Some(&header)),
            FileKind::office(OfficeFamily::Word, OfficeGeneration::Legacy)
        );
    }

    #[test]
    fn test_truncated_signature_does_not_match() {
        // Five of the six 7z bytes, followed by a non-printable byte.
        let header = [0x37, 0x7A, 0xBC, 0xAF, 0x27];
        assert_eq!(classify(Some(&header)), FileKind::Unknown);
    }

    #[test]
    fn test_signatures_are_checked_before_text() {
        // "%PDF" is printable ASCII, so order decides the outcome.
        assert_eq!(classify(Some(b"%PDF-1.4 plain looking")), FileKind::Pdf);
    }

    #[test]
    fn test_empty_and_absent_header_are_unreadable() {
        assert_eq!(classify(None), FileKind::Unreadable);
        assert_eq!(classify(Some(&[])), FileKind::Unreadable);
    }

    #[test]
    fn test_plain_text_heuristic() {
        assert_eq!(
            classify(Some(b"name,age\r\nalice,30\n\tbob,41\n")),
            FileKind::PlainText
        );
        assert_eq!(classify(Some(b"abc\x00def")), FileKind::Unknown);
        assert_eq!(classify(Some("caf\u{e9}".as_bytes())), FileKind::Unknown);
    }

    #[test]
    fn test_plain_text_only_samples_first_hundred_bytes() {
        let mut header = vec![b'a'; TEXT_SAMPLE_LEN];
        header.extend_from_slice(&[0x00, 0x01, 0x02]);
        assert_eq!(classify(Some(&header)), FileKind::PlainText);

        let mut header = vec![b'a'; TEXT_SAMPLE_LEN - 1];
        header.push(0x00);
        assert_eq!(classify(Some(&header)), FileKind::Unknown);
    }

    #[test]
    fn test_read_header_is_bounded() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("big");
        fs::write(&path, vec![b'x'; HEADER_LEN * 4]).expect("Failed to write test file");

        let header = read_header(&path).expect("Header should be readable");
        assert_eq!(header.len(), HEADER_LEN);
    }

    #[test]
    fn test_read_header_short_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("short");
        fs::write(&path, b"%PDF").expect("Failed to write test file");

        assert_eq!(read_header(&path), Some(b"%PDF".to_vec()));
    }

    #[test]
    fn test_read_header_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        assert_eq!(read_header(&temp_dir.path().join("missing")), None);
    }
}
