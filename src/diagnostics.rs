//! Data-quality report for the metadata sheet.
//!
//! Every clip quote is matched against the script and the outcomes are tallied. This is a
//! debugging aid for whoever maintains the sheet; the grouped view never depends on it.

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::matcher::{MatchResult, match_quote};
use crate::metadata::AudioClip;
use crate::opts::MatchOpts;
use crate::segments::ScriptSegment;

/// A quote accepted by the fuzzy pass, kept so the match can be eyeballed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyHit {
    pub filename: String,
    pub quote: String,
    pub segment_text: String,
    pub score: f64,
}

/// Tallies of how the sheet's quotes matched the script.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchReport {
    pub total: usize,
    pub strict: usize,
    pub fuzzy: usize,
    pub unmatched: usize,
    /// Fuzzy matches in clip order.
    pub fuzzy_matches: Vec<FuzzyHit>,
    /// The first few unmatched quotes in clip order.
    pub unmatched_sample: Vec<String>,
}

/// Match every clip's quote and build a [`MatchReport`].
///
/// Quotes are matched in parallel; the segment list is shared read-only and results are
/// collected back in clip order, so the report is deterministic.
pub fn diagnose(clips: &[AudioClip], segments: &[ScriptSegment], opts: &MatchOpts) -> MatchReport {
    let results: Vec<MatchResult> = clips
        .par_iter()
        .map(|clip| match_quote(&clip.quote, segments, opts.threshold))
        .collect();

    let mut report = MatchReport {
        total: clips.len(),
        ..MatchReport::default()
    };

    for (clip, result) in clips.iter().zip(results) {
        match result {
            MatchResult::Strict { .. } => report.strict += 1,
            MatchResult::Fuzzy {
                segment_index,
                score,
            } => {
                report.fuzzy += 1;
                report.fuzzy_matches.push(FuzzyHit {
                    filename: clip.filename.clone(),
                    quote: clip.quote.clone(),
                    segment_text: segments[segment_index].text.clone(),
                    score,
                });
            }
            MatchResult::Unmatched => {
                report.unmatched += 1;
                if report.unmatched_sample.len() < opts.sample_size {
                    report.unmatched_sample.push(clip.quote.clone());
                }
            }
        }
    }

    info!(
        total = report.total,
        strict = report.strict,
        fuzzy = report.fuzzy,
        unmatched = report.unmatched,
        threshold = opts.threshold,
        "quote diagnostics complete"
    );

    report
}
