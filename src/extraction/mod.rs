//! Document text extraction
//!
//! Turns an uploaded file into plain text. PDFs go through `lopdf`,
//! everything else is decoded as UTF-8 with a Latin-1 fallback.
//! Extraction never fails outward: errors are logged and produce an
//! empty string, which the analyzer treats as "nothing to analyze".

pub mod pdf;
pub mod text;

pub use pdf::extract_pdf_text;
pub use text::decode_text;

use crate::models::UploadedDocument;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    /// PDF when the declared content type is `application/pdf` or the
    /// filename carries a `.pdf` extension, text otherwise.
    pub fn detect(filename: &str, content_type: Option<&str>) -> Self {
        let declared_pdf = content_type
            .and_then(|ct| ct.parse::<mime::Mime>().ok())
            .map(|m| m.essence_str() == mime::APPLICATION_PDF.essence_str())
            .unwrap_or(false);

        if declared_pdf || filename.to_ascii_lowercase().ends_with(".pdf") {
            DocumentKind::Pdf
        } else {
            DocumentKind::Text
        }
    }
}

/// Extract plain text from an uploaded document
pub fn extract_text(document: &UploadedDocument) -> String {
    let kind = DocumentKind::detect(&document.filename, document.content_type.as_deref());
    debug!(filename = %document.filename, kind = ?kind, bytes = document.bytes.len(), "Extracting text");

    match kind {
        DocumentKind::Pdf => match extract_pdf_text(&document.bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(filename = %document.filename, error = %e, "PDF extraction failed");
                String::new()
            }
        },
        DocumentKind::Text => decode_text(&document.bytes),
    }
}
