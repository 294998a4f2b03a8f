//! Decoding and line-ending normalization

use encoding_rs::Encoding;
use std::borrow::Cow;
use thiserror::Error;

/// Why a single charset candidate could not be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CharsetError {
    /// The label does not name an encoding we can decode
    #[error("unsupported charset: {label}")]
    Unsupported { label: String },

    /// The bytes are not valid in this encoding
    #[error("malformed input for charset {label}")]
    Malformed { label: String },
}

/// Replace `\r\n` and then any remaining `\r` with `\n`
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Decode `bytes` with the encoding named by `label`, normalize line endings
/// and return the UTF-8 result
///
/// A leading byte-order mark is always dropped. Decoding is strict:
/// any malformed sequence rejects the candidate instead of being replaced.
pub fn decode_normalized(bytes: &[u8], label: &str) -> Result<Vec<u8>, CharsetError> {
    let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
        CharsetError::Unsupported {
            label: label.to_string(),
        }
    })?;

    // The replacement encoding decodes everything to U+FFFD.
    if encoding == encoding_rs::REPLACEMENT {
        return Err(CharsetError::Unsupported {
            label: label.to_string(),
        });
    }

    // A BOM is dropped even when its own encoding was rejected and a later
    // candidate is decoding; otherwise it would survive as mojibake.
    let body = match Encoding::for_bom(bytes) {
        Some((_, bom_len)) => &bytes[bom_len..],
        None => bytes,
    };

    let decoded = encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| CharsetError::Malformed {
            label: label.to_string(),
        })?;

    Ok(normalize_line_endings(&decoded).into_owned().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_crlf_and_cr() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\nd"), "a\nb\nc\nd");
        assert_eq!(normalize_line_endings("\r\r\n"), "\n\n");
    }

    #[test]
    fn test_normalize_borrows_when_clean() {
        assert!(matches!(normalize_line_endings("no carriage"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_decode_latin1() {
        let out = decode_normalized(b"caf\xe9\r\n", "ISO-8859-1").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "café\n");
    }

    #[test]
    fn test_decode_utf16le_with_bom() {
        let bytes = [0xFF, 0xFE, b'o', 0, b'k', 0, b'\r', 0, b'\n', 0];
        let out = decode_normalized(&bytes, "UTF-16LE").unwrap();
        assert_eq!(out, b"ok\n");
    }

    #[test]
    fn test_decode_strips_utf8_bom() {
        let out = decode_normalized(b"\xEF\xBB\xBFline\r", "UTF-8").unwrap();
        assert_eq!(out, b"line\n");
    }

    #[test]
    fn test_decode_drops_bom_of_rejected_encoding() {
        let bytes = b"\xEF\xBB\xBFcaf\xe9\r\n";
        assert!(decode_normalized(bytes, "UTF-8").is_err());

        let out = decode_normalized(bytes, "windows-1252").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "café\n");
    }

    #[test]
    fn test_unknown_label_is_unsupported() {
        let err = decode_normalized(b"abc", "IBM420_ltr").unwrap_err();
        assert_eq!(
            err,
            CharsetError::Unsupported {
                label: "IBM420_ltr".to_string()
            }
        );
    }

    #[test]
    fn test_replacement_label_is_unsupported() {
        let err = decode_normalized(b"abc", "iso-2022-kr").unwrap_err();
        assert!(matches!(err, CharsetError::Unsupported { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let err = decode_normalized(b"caf\xe9", "UTF-8").unwrap_err();
        assert!(matches!(err, CharsetError::Malformed { .. }));
        assert!(err.to_string().contains("UTF-8"));
    }
}
