//! Loaded text and its line index.
//!
//! This module handles:
//! - Decoding raw file bytes into text
//! - Splitting text into display lines
//! - Bounds-checked line lookup

mod types;

pub use types::Document;

/// Decode raw file bytes into a document.
///
/// Invalid UTF-8 sequences are replaced rather than rejected so binary or
/// mixed-encoding files still open.
pub fn document_from_bytes(bytes: Vec<u8>) -> Document {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!("file is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };
    Document::load(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_valid_utf8() {
        let doc = document_from_bytes(b"hello\nworld".to_vec());
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line_at(1).unwrap(), "hello");
    }

    #[test]
    fn test_document_from_invalid_utf8_is_lossy() {
        let doc = document_from_bytes(vec![b'a', 0xff, b'b']);
        assert_eq!(doc.line_at(1).unwrap(), "a\u{fffd}b");
    }
}
