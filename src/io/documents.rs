//! Document-to-text conversion boundary.
//!
//! The extraction core consumes plain text only; this module is the
//! collaborator that turns uploaded bytes into UTF-8 text. The conversion
//! strategy is selected by file extension. Byte streams that are not a valid
//! instance of their declared format fail with a distinguishable
//! [`SimapError::Document`] so callers can report "document unreadable"
//! instead of analyzing garbage.
//!
//! PDF and DOCX payloads are validated against their magic numbers but full
//! text extraction for those formats is not wired in this build; both report
//! a conversion error rather than silently degrading.

use tracing::debug;

use crate::core::errors::{Result, SimapError};

const PDF_MAGIC: &[u8] = b"%PDF-";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Conversion strategy, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Portable Document Format
    Pdf,
    /// Office Open XML word-processing document
    Docx,
    /// Anything else: bytes decoded as UTF-8 text
    PlainText,
}

impl DocumentKind {
    /// Select the conversion strategy for a file name.
    pub fn from_filename(file_name: &str) -> Self {
        let lowered = file_name.to_lowercase();
        if lowered.ends_with(".pdf") {
            Self::Pdf
        } else if lowered.ends_with(".docx") {
            Self::Docx
        } else {
            Self::PlainText
        }
    }
}

/// Convert document bytes into UTF-8 text.
pub fn extract_text(bytes: &[u8], file_name: &str) -> Result<String> {
    let kind = DocumentKind::from_filename(file_name);
    debug!("Converting '{file_name}' as {kind:?} ({} bytes)", bytes.len());

    match kind {
        DocumentKind::Pdf => {
            if !bytes.starts_with(PDF_MAGIC) {
                return Err(SimapError::document_in_file(
                    "not a valid PDF document (missing %PDF header)",
                    file_name,
                ));
            }
            Err(SimapError::document_in_file(
                "PDF text conversion is not available in this build",
                file_name,
            ))
        }
        DocumentKind::Docx => {
            if !bytes.starts_with(ZIP_MAGIC) {
                return Err(SimapError::document_in_file(
                    "not a valid DOCX document (missing ZIP header)",
                    file_name,
                ));
            }
            Err(SimapError::document_in_file(
                "DOCX text conversion is not available in this build",
                file_name,
            ))
        }
        DocumentKind::PlainText => String::from_utf8(bytes.to_vec()).map_err(|_| {
            SimapError::document_in_file("document is not valid UTF-8 text", file_name)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_follows_extension() {
        assert_eq!(DocumentKind::from_filename("plan.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("audit.docx"), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_filename("notes.txt"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_filename("sans_extension"), DocumentKind::PlainText);
    }

    #[test]
    fn plain_text_round_trips() {
        let text = extract_text("serveur WEB01 en production".as_bytes(), "notes.txt").unwrap();
        assert_eq!(text, "serveur WEB01 en production");
    }

    #[test]
    fn invalid_utf8_is_a_document_error() {
        let err = extract_text(&[0xff, 0xfe, 0x00], "notes.txt").unwrap_err();
        assert!(err.is_document_error());
    }

    #[test]
    fn corrupt_pdf_is_rejected_on_magic() {
        let err = extract_text(b"pas un pdf", "plan.pdf").unwrap_err();
        assert!(err.is_document_error());
        assert!(err.to_string().contains("%PDF"));
    }

    #[test]
    fn valid_magic_without_converter_still_fails_distinguishably() {
        let err = extract_text(b"PK\x03\x04reste", "audit.docx").unwrap_err();
        assert!(err.is_document_error());
        assert!(err.to_string().contains("not available"));
    }
}
