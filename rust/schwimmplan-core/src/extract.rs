use lopdf::Document;
use tracing::debug;

use crate::error::{ScheduleError, ScheduleResult};

/// Decode PDF bytes into plain text.
///
/// Pages are extracted in page order and concatenated; no separator is
/// guaranteed beyond what the individual pages produce. Malformed
/// documents and documents without any extractable text map to a decode
/// error, never a panic.
pub fn extract_text(bytes: &[u8]) -> ScheduleResult<String> {
    let document = Document::load_mem(bytes)?;

    let mut text = String::new();
    for page_number in document.get_pages().keys() {
        text.push_str(&document.extract_text(&[*page_number])?);
    }

    if text.trim().is_empty() {
        return Err(ScheduleError::Decode(
            "Document contains no extractable text".to_string(),
        ));
    }

    debug!(
        pages = document.get_pages().len(),
        chars = text.len(),
        "Extracted document text"
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    #[test]
    fn test_garbage_bytes_are_a_decode_error() {
        let err = extract_text(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, ScheduleError::Decode(_)));
    }

    #[test]
    fn test_empty_input_is_a_decode_error() {
        assert!(extract_text(&[]).is_err());
    }

    #[test]
    fn test_document_without_text_is_a_decode_error() {
        // A structurally valid PDF with zero pages yields no text.
        let mut document = Document::with_version("1.5");
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
        });
        document.trailer.set("Root", catalog_id);
        let mut bytes = Vec::new();
        document.save_to(&mut bytes).unwrap();

        let err = extract_text(&bytes).unwrap_err();
        assert!(matches!(err, ScheduleError::Decode(_)));
    }
}
