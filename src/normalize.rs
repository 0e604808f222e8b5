//! Text canonicalization shared by every comparison in the matcher.

/// Canonicalize text for comparison.
///
/// Every character that is not an ASCII letter, ASCII digit or whitespace is dropped, the
/// remainder is lower-cased and surrounding whitespace is trimmed. Inner whitespace is kept
/// as-is, so `"a  b"` stays `"a  b"`.
pub fn normalize_text(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    kept.trim().to_owned()
}
