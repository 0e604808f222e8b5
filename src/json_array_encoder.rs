use std::io::Write;

use serde::Serialize;

use crate::Result;
use crate::metadata::AudioClip;
use crate::section_encoder::SectionEncoder;

/// One element of the JSON output.
#[derive(Serialize)]
struct SectionEntry<'a> {
    section: &'a str,
    clips: &'a [AudioClip],
}

/// A `SectionEncoder` that writes sections as a single JSON array.
///
/// Design:
/// - We stream output directly to a `Write` implementation so large sheets are never
///   serialized into one in-memory string.
/// - The encoder is stateful so we can emit a well-formed JSON array incrementally.
///
/// Example output:
/// ```json
/// [
///   { "section": "SCENE 1", "clips": [{ "filename": "take1.WAV", "linked_path": "/static/audio/take1.WAV.MP3", ... }] }
/// ]
/// ```
pub struct JsonArrayEncoder<W: Write> {
    /// The underlying writer we stream JSON into.
    w: W,

    /// Whether we have written the opening `[` of the JSON array.
    started: bool,

    /// Whether the next element will be the first element in the array.
    first: bool,

    /// Once closed, no further writes are allowed.
    closed: bool,
}

impl<W: Write> JsonArrayEncoder<W> {
    /// Create a new JSON array encoder that writes to the given writer.
    ///
    /// The JSON array is opened lazily on the first write or on close.
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            first: true,
            closed: false,
        }
    }

    /// Write the opening `[` of the JSON array if we have not already done so.
    ///
    /// Deferring it means empty output still results in valid JSON (`[]`).
    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            self.w.write_all(b"[")?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> SectionEncoder for JsonArrayEncoder<W> {
    /// Serialize a single section and append it to the JSON array.
    fn write_section(&mut self, section: &str, clips: &[AudioClip]) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write section: encoder is already closed",
            ));
        }

        self.start_if_needed()?;

        // Write a comma before every element except the first.
        if !self.first {
            self.w.write_all(b",")?;
        }
        self.first = false;

        serde_json::to_writer(&mut self.w, &SectionEntry { section, clips })?;
        self.w.flush()?;

        Ok(())
    }

    /// Finalize the JSON array and flush the underlying writer.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.start_if_needed()?;
        self.w.write_all(b"]")?;
        self.w.flush()?;

        self.closed = true;
        Ok(())
    }
}
