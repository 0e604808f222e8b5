//! `scriptlink` — links a narrative script to a sheet of recorded audio takes.
//!
//! This crate provides:
//! - Script segmentation into sections and (optionally attributed) segments
//! - Metadata sheet parsing into audio clip records
//! - Quote ↔ segment matching (strict containment, then a fuzzy longest-run ratio)
//! - Linking clips to local audio files and grouping them by section
//! - Pluggable output encoders (JSON, plain text)
//!
//! The core is pure and synchronous: malformed or unmatched inputs are excluded from the
//! output rather than raised as errors. Only the filesystem adapters and encoders can fail.

// High-level API (most consumers should start here).
pub mod opts;
pub mod project;

// Core pipeline stages.
pub mod diagnostics;
pub mod linker;
pub mod matcher;
pub mod metadata;
pub mod normalize;
pub mod segments;

// Reading synced inputs from disk.
pub mod sources;

// Output selection and encoder interfaces.
pub mod output_type;
pub mod section_encoder;

// Output encoders that serialize grouped sections.
pub mod json_array_encoder;
pub mod text_encoder;

// Logging configuration for binaries.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use diagnostics::{FuzzyHit, MatchReport, diagnose};
pub use error::{Error, Result};
pub use linker::{LinkOpts, SectionMap, clean_filename, organize_by_section};
pub use matcher::{DEFAULT_THRESHOLD, MatchResult, MatchStrategy, match_quote};
pub use metadata::{AudioClip, ColumnLayout, parse_sheet_rows};
pub use normalize::normalize_text;
pub use opts::{MatchOpts, Opts};
pub use output_type::OutputType;
pub use project::Project;
pub use segments::{ScriptSegment, SegmentOpts, segment_script};
pub use sources::DataLayout;

#[cfg(feature = "logging")]
pub use logging::init as init_logging;
