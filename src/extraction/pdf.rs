use lopdf::Document;
use tracing::{debug, warn};

use crate::types::{AppError, AppResult};

/// Extract the text layer of a PDF held in memory
///
/// Pages are visited in page-number order. Each page that yields text
/// contributes its text followed by exactly one newline: lopdf already ends
/// every text object with `\n`, so trailing whitespace is trimmed first.
/// Pages without a text layer (or whose content cannot be decoded) are
/// skipped.
pub fn extract_pdf_text(bytes: &[u8]) -> AppResult<String> {
    let document = Document::load_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("Failed to load PDF: {}", e)))?;

    let pages = document.get_pages();
    let mut text = String::new();

    for page_number in pages.keys() {
        match document.extract_text(&[*page_number]) {
            Ok(page_text) => {
                let page_text = page_text.trim_end();
                if !page_text.trim().is_empty() {
                    text.push_str(page_text);
                    text.push('\n');
                }
            }
            Err(e) => {
                warn!(page = page_number, error = %e, "Failed to extract text from page");
            }
        }
    }

    debug!(pages = pages.len(), chars = text.chars().count(), "PDF text extracted");
    Ok(text)
}


#[cfg(test)]
mod tests {
    use super::test_support::build_pdf;
    use super::*;

    #[test]
    fn test_pages_in_order() {
        let pdf = build_pdf(&["Revenue grew 20 percent", "Margins expanded 50bps", "Capex guided to 2B"]);
        let text = extract_pdf_text(&pdf).unwrap();

        assert_eq!(
            text,
            "Revenue grew 20 percent\nMargins expanded 50bps\nCapex guided to 2B\n"
        );
    }

    #[test]
    fn test_pages_without_text_are_skipped() {
        let pdf = build_pdf(&["Opening remarks", "", "Closing remarks"]);
        let text = extract_pdf_text(&pdf).unwrap();

        assert_eq!(text, "Opening remarks\nClosing remarks\n");
    }

    #[test]
    fn test_no_text_layer() {
        let pdf = build_pdf(&["", ""]);
        assert_eq!(extract_pdf_text(&pdf).unwrap(), "");
    }

    #[test]
    fn test_garbage_is_extraction_error() {
        assert!(matches!(
            extract_pdf_text(b"plain text pretending to be a pdf"),
            Err(AppError::Extraction(_))
        ));
        assert!(matches!(extract_pdf_text(b""), Err(AppError::Extraction(_))));
    }
}
