//! High-level API over a synced data layout.
//!
//! We expose a single entry point (`Project`) that wires the pieces together:
//! read inputs from disk → parse/segment → link or match → encode.
//!
//! Nothing is cached between calls. Every call re-reads the layout, so a sync that lands
//! between two calls is picked up by the second one.

use std::io::{BufWriter, Write};

use crate::Result;
use crate::diagnostics::{MatchReport, diagnose};
use crate::json_array_encoder::JsonArrayEncoder;
use crate::linker::{SectionMap, organize_by_section};
use crate::metadata::{AudioClip, parse_sheet_rows};
use crate::opts::Opts;
use crate::output_type::OutputType;
use crate::section_encoder::{SectionEncoder, write_sections};
use crate::segments::{ScriptSegment, segment_script};
use crate::sources::{DataLayout, list_local_files, load_script, load_sheet_rows};
use crate::text_encoder::TextEncoder;

/// A data layout plus the options used to interpret it.
#[derive(Debug, Clone, Default)]
pub struct Project {
    layout: DataLayout,
    opts: Opts,
}

impl Project {
    pub fn new(layout: DataLayout, opts: Opts) -> Self {
        Self { layout, opts }
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    pub fn opts(&self) -> &Opts {
        &self.opts
    }

    /// Parse the sheet dump into clips.
    pub fn clips(&self) -> Result<Vec<AudioClip>> {
        let rows = load_sheet_rows(self.layout.metadata_path())?;
        Ok(parse_sheet_rows(&rows))
    }

    /// Segment the synced script.
    pub fn segments(&self) -> Result<Vec<ScriptSegment>> {
        let text = load_script(self.layout.script_path())?;
        Ok(segment_script(&text, &self.opts.segment))
    }

    /// Link clips to the audio directory and group them by section.
    pub fn sections(&self) -> Result<SectionMap> {
        let clips = self.clips()?;
        let local = list_local_files(&self.layout.audio_dir)?;
        Ok(organize_by_section(clips, &local, &self.opts.link))
    }

    /// Match every clip quote against the script.
    pub fn diagnostics(&self) -> Result<MatchReport> {
        let segments = self.segments()?;
        let clips = self.clips()?;
        Ok(diagnose(&clips, &segments, &self.opts.matching))
    }

    /// Link and group, then stream the sections to `w` in the configured output type.
    pub fn write_sections<W: Write>(&self, w: W) -> Result<()> {
        let sections = self.sections()?;
        encode_sections(&sections, self.opts.output_type, w)
    }
}

/// Encode grouped sections to `w`.
///
/// The encoder is closed even when a write fails, so JSON output is terminated where possible.
pub fn encode_sections<W: Write>(
    sections: &SectionMap,
    output_type: OutputType,
    w: W,
) -> Result<()> {
    // Buffer output for efficiency (especially important for stdout).
    let writer = BufWriter::new(w);

    // We keep this explicit (no trait objects) to avoid lifetime surprises.
    match output_type {
        OutputType::Json => {
            let mut encoder = JsonArrayEncoder::new(writer);
            let run_res = write_sections(sections, &mut encoder);
            merge_run_and_close(run_res, encoder.close())
        }
        OutputType::Text => {
            let mut encoder = TextEncoder::new(writer);
            let run_res = write_sections(sections, &mut encoder);
            merge_run_and_close(run_res, encoder.close())
        }
    }
}

/// Write a diagnostics report to `w`.
pub fn encode_report<W: Write>(report: &MatchReport, output_type: OutputType, w: W) -> Result<()> {
    let mut w = BufWriter::new(w);
    match output_type {
        OutputType::Json => {
            serde_json::to_writer_pretty(&mut w, report)?;
            writeln!(w)?;
        }
        OutputType::Text => {
            writeln!(w, "Total quotes: {}", report.total)?;
            writeln!(w, "Strict matches: {}", report.strict)?;
            writeln!(w, "Fuzzy matches: {}", report.fuzzy)?;
            writeln!(w, "Missed: {}", report.unmatched)?;

            for hit in &report.fuzzy_matches {
                writeln!(w)?;
                writeln!(w, "[FUZZY {:.2}] {}", hit.score, hit.filename)?;
                writeln!(w, "Q: {}", hit.quote)?;
                writeln!(w, "S: {}", hit.segment_text)?;
            }

            if !report.unmatched_sample.is_empty() {
                writeln!(w)?;
                writeln!(w, "Sample missed:")?;
                for quote in &report.unmatched_sample {
                    writeln!(w, "- {quote}")?;
                }
            }
        }
    }
    w.flush()?;
    Ok(())
}

fn merge_run_and_close(run_res: Result<()>, close_res: Result<()>) -> Result<()> {
    match (run_res, close_res) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(close_err)) => Err(close_err),
        (Err(err), _) => Err(err),
    }
}
