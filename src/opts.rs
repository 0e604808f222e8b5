use crate::linker::LinkOpts;
use crate::matcher::DEFAULT_THRESHOLD;
use crate::output_type::OutputType;
use crate::segments::SegmentOpts;

/// Number of unmatched quotes kept in a diagnostics report by default.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Options for quote matching diagnostics.
#[derive(Debug, Clone)]
pub struct MatchOpts {
    /// Fuzzy acceptance threshold; a quote's longest shared run must cover strictly more than
    /// this fraction of the quote.
    pub threshold: f64,

    /// How many unmatched quotes a report keeps as a sample.
    pub sample_size: usize,
}

impl Default for MatchOpts {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

/// Options for a full run of the pipeline.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The binaries map user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (the HTTP server, tests, batch jobs) can construct options programmatically
#[derive(Debug, Clone, Default)]
pub struct Opts {
    /// How script lines are split into sections and segments.
    pub segment: SegmentOpts,

    /// Threshold and sampling for quote diagnostics.
    pub matching: MatchOpts,

    /// How linked clips are given a path.
    pub link: LinkOpts,

    /// The desired output format for grouped sections and reports.
    pub output_type: OutputType,
}
