//! Quote ↔ script segment correspondence.
//!
//! Matching is per quote and greedy: segments are scanned in script order and the first
//! acceptable segment wins, even if a later one would score higher.
//!
//! Two passes run over the full segment list:
//! 1. strict: substring containment between the normalized quote and segment text
//! 2. fuzzy: the longest shared contiguous run, as a fraction of the quote length, must exceed
//!    the caller's threshold

use serde::Serialize;
use tracing::trace;

use crate::normalize::normalize_text;
use crate::segments::ScriptSegment;

/// Default fuzzy acceptance threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// A segment text contained in the quote only counts as strict when it is longer than this.
const MIN_CONTAINED_SEGMENT_CHARS: usize = 10;

/// Which pass produced a [`MatchResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    Strict,
    Fuzzy,
    None,
}

/// Outcome of matching one quote against the script.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum MatchResult {
    /// Substring containment against the segment at `segment_index`.
    Strict { segment_index: usize },
    /// Longest shared run covered `score` of the quote.
    Fuzzy { segment_index: usize, score: f64 },
    /// No segment was acceptable.
    #[serde(rename = "none")]
    Unmatched,
}

impl MatchResult {
    pub fn strategy(&self) -> MatchStrategy {
        match self {
            Self::Strict { .. } => MatchStrategy::Strict,
            Self::Fuzzy { .. } => MatchStrategy::Fuzzy,
            Self::Unmatched => MatchStrategy::None,
        }
    }

    /// Index of the matched segment, if any.
    pub fn segment_index(&self) -> Option<usize> {
        match self {
            Self::Strict { segment_index } | Self::Fuzzy { segment_index, .. } => {
                Some(*segment_index)
            }
            Self::Unmatched => None,
        }
    }

    /// Fuzzy score, only present for fuzzy matches.
    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Fuzzy { score, .. } => Some(*score),
            _ => None,
        }
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, Self::Unmatched)
    }
}

/// Match a quote against `segments` in order.
///
/// `threshold` is the fuzzy acceptance ratio; a segment is accepted only when its ratio is
/// strictly greater. Use [`DEFAULT_THRESHOLD`] when the caller has no preference.
pub fn match_quote(quote: &str, segments: &[ScriptSegment], threshold: f64) -> MatchResult {
    let quote = normalize_text(quote);
    let texts: Vec<String> = segments.iter().map(|s| normalize_text(&s.text)).collect();

    if let Some(segment_index) = texts.iter().position(|text| is_strict_match(&quote, text)) {
        trace!(segment_index, "strict match");
        return MatchResult::Strict { segment_index };
    }

    for (segment_index, text) in texts.iter().enumerate() {
        let Some(score) = fuzzy_ratio(&quote, text) else {
            continue;
        };
        if score > threshold {
            trace!(segment_index, score, "fuzzy match");
            return MatchResult::Fuzzy {
                segment_index,
                score,
            };
        }
    }

    MatchResult::Unmatched
}

/// Strict containment test on already normalized text.
fn is_strict_match(quote: &str, text: &str) -> bool {
    if !quote.is_empty() && text.contains(quote) {
        return true;
    }
    text.chars().count() > MIN_CONTAINED_SEGMENT_CHARS && quote.contains(text)
}

/// Fraction of `quote` covered by its longest run shared with `text`.
///
/// Returns `None` when either side is empty; such a pair can never match.
fn fuzzy_ratio(quote: &str, text: &str) -> Option<f64> {
    if quote.is_empty() || text.is_empty() {
        return None;
    }

    let quote_len = quote.chars().count();
    let run = longest_common_run(quote, text);
    Some(run as f64 / quote_len as f64)
}

/// Length, in characters, of the longest contiguous substring shared by `a` and `b`.
pub fn longest_common_run(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // prev[j + 1] holds the run length ending at a[i - 1], b[j].
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let mut best = 0;

    for &ca in &a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            best = best.max(curr[j + 1]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}
