//! Charset detection and text normalization
//!
//! Detection produces an ordered list of [`CharsetCandidate`]s, most likely
//! first. The synchronizer walks that list and keeps the first candidate that
//! decodes the file cleanly (see [`decode_normalized`]).

mod normalize;

pub use normalize::{decode_normalized, normalize_line_endings, CharsetError};

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// Confidence for an encoding announced by a byte-order mark
pub const CONFIDENCE_BOM: u8 = 100;
/// Confidence for valid UTF-8 containing non-ASCII bytes
pub const CONFIDENCE_UTF8: u8 = 100;
/// Confidence for pure ASCII (decodes identically in most charsets)
pub const CONFIDENCE_ASCII: u8 = 90;
/// Confidence for the statistical guess
pub const CONFIDENCE_GUESS: u8 = 60;
/// Confidence for the Latin-1 last resort
pub const CONFIDENCE_FALLBACK: u8 = 10;

/// A hypothesized text encoding for a byte buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetCandidate {
    /// Encoding label, as understood by `encoding_rs`
    pub name: String,

    /// 0-100, higher is more likely
    pub confidence: u8,
}

impl CharsetCandidate {
    /// Create a candidate from a label and confidence
    pub fn new(name: impl Into<String>, confidence: u8) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }

    fn from_encoding(encoding: &'static Encoding, confidence: u8) -> Self {
        Self::new(encoding.name(), confidence)
    }
}

/// Probe raw bytes and return candidate encodings, best first
///
/// An empty result means the buffer does not look like text at all (NUL
/// bytes without a byte-order mark).
///
/// ```
/// use srcsync::charset::detect_charsets;
///
/// let candidates = detect_charsets(b"plain ascii\r\n");
/// assert_eq!(candidates[0].name, "UTF-8");
/// assert!(detect_charsets(b"\x00\x01\x02binary").is_empty());
/// ```
pub fn detect_charsets(bytes: &[u8]) -> Vec<CharsetCandidate> {
    let mut candidates: Vec<CharsetCandidate> = Vec::with_capacity(4);

    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        push_unique(
            &mut candidates,
            CharsetCandidate::from_encoding(encoding, CONFIDENCE_BOM),
        );
    } else if bytes.contains(&0) {
        return candidates;
    }

    if bytes.is_empty() {
        push_unique(
            &mut candidates,
            CharsetCandidate::from_encoding(UTF_8, CONFIDENCE_UTF8),
        );
        return candidates;
    }

    if std::str::from_utf8(bytes).is_ok() {
        let confidence = if bytes.is_ascii() {
            CONFIDENCE_ASCII
        } else {
            CONFIDENCE_UTF8
        };
        push_unique(
            &mut candidates,
            CharsetCandidate::from_encoding(UTF_8, confidence),
        );
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guess = detector.guess(None, true);
    push_unique(
        &mut candidates,
        CharsetCandidate::from_encoding(guess, CONFIDENCE_GUESS),
    );

    push_unique(
        &mut candidates,
        CharsetCandidate::from_encoding(WINDOWS_1252, CONFIDENCE_FALLBACK),
    );

    candidates
}

fn push_unique(candidates: &mut Vec<CharsetCandidate>, candidate: CharsetCandidate) {
    if !candidates.iter().any(|c| c.name == candidate.name) {
        candidates.push(candidate);
    }
}
