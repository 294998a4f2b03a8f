//! Text path: charset fallback, normalization and change detection

use crate::charset::{decode_normalized, CharsetCandidate, CharsetError};

/// Result of trying charset candidates in order
#[derive(Debug, PartialEq, Eq)]
pub enum Normalized {
    /// First candidate that decoded cleanly, with the UTF-8/LF content
    Text { charset: String, content: Vec<u8> },

    /// Detection produced no candidates
    NoCandidates,

    /// Every candidate was rejected
    Exhausted { tried: usize },
}

/// Decode `bytes` with each candidate until one succeeds
///
/// `on_reject` is called once per rejected candidate, in order, before the
/// next one is tried.
///
/// ```
/// use srcsync::charset::CharsetCandidate;
/// use srcsync::executor::{normalize_with_candidates, Normalized};
///
/// let candidates = vec![
///     CharsetCandidate::new("no-such-charset", 80),
///     CharsetCandidate::new("ISO-8859-1", 40),
/// ];
/// let mut rejected = Vec::new();
/// let result = normalize_with_candidates(b"caf\xe9\r\n", &candidates, |c, _| {
///     rejected.push(c.name.clone())
/// });
///
/// assert_eq!(rejected, vec!["no-such-charset".to_string()]);
/// assert!(matches!(result, Normalized::Text { ref content, .. } if content == "café\n".as_bytes()));
/// ```
pub fn normalize_with_candidates<F>(
    bytes: &[u8],
    candidates: &[CharsetCandidate],
    mut on_reject: F,
) -> Normalized
where
    F: FnMut(&CharsetCandidate, &CharsetError),
{
    if candidates.is_empty() {
        return Normalized::NoCandidates;
    }

    for candidate in candidates {
        match decode_normalized(bytes, &candidate.name) {
            Ok(content) => {
                return Normalized::Text {
                    charset: candidate.name.clone(),
                    content,
                };
            }
            Err(err) => on_reject(candidate, &err),
        }
    }

    Normalized::Exhausted {
        tried: candidates.len(),
    }
}
