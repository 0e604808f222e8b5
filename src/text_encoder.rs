use std::io::Write;

use crate::Result;
use crate::metadata::AudioClip;
use crate::section_encoder::SectionEncoder;

/// A `SectionEncoder` that writes a human-readable listing.
///
/// Each section is a heading line followed by one indented line per clip:
///
/// ```text
/// SCENE 1
///   take1.WAV  Bob  00:01-00:02  /static/audio/take1.WAV.MP3
///     "Well, hello world"
/// ```
pub struct TextEncoder<W: Write> {
    w: W,
    first: bool,
    closed: bool,
}

impl<W: Write> TextEncoder<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            first: true,
            closed: false,
        }
    }
}

impl<W: Write> SectionEncoder for TextEncoder<W> {
    fn write_section(&mut self, section: &str, clips: &[AudioClip]) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write section: encoder is already closed",
            ));
        }

        // Blank line between sections.
        if !self.first {
            writeln!(&mut self.w)?;
        }
        self.first = false;

        writeln!(&mut self.w, "{section}")?;
        for clip in clips {
            let path = clip.linked_path.as_deref().unwrap_or("-");
            writeln!(
                &mut self.w,
                "  {}  {}  {}-{}  {}",
                clip.filename, clip.person, clip.start, clip.stop, path
            )?;
            if !clip.quote.is_empty() {
                writeln!(&mut self.w, "    \"{}\"", clip.quote)?;
            }
        }

        self.w.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(filename: &str, quote: &str) -> AudioClip {
        AudioClip {
            filename: filename.to_owned(),
            person: "Bob".to_owned(),
            start: "00:01".to_owned(),
            stop: "00:02".to_owned(),
            section: "SCENE 1".to_owned(),
            quote: quote.to_owned(),
            linked_path: Some(format!("/static/audio/{filename}.MP3")),
        }
    }

    #[test]
    fn text_close_without_sections_emits_nothing() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = TextEncoder::new(&mut out);
        enc.close()?;
        assert_eq!(std::str::from_utf8(&out)?, "");
        Ok(())
    }

    #[test]
    fn text_lists_sections_and_clips() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = TextEncoder::new(&mut out);
        enc.write_section("SCENE 1", &[clip("take1.WAV", "Hello there")])?;
        enc.write_section("SCENE 2", &[clip("take2.WAV", "")])?;
        enc.close()?;

        let s = std::str::from_utf8(&out)?;
        assert_eq!(
            s,
            "SCENE 1\n  take1.WAV  Bob  00:01-00:02  /static/audio/take1.WAV.MP3\n    \"Hello there\"\n\nSCENE 2\n  take2.WAV  Bob  00:01-00:02  /static/audio/take2.WAV.MP3\n"
        );
        Ok(())
    }

    #[test]
    fn text_write_after_close_errors() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = TextEncoder::new(&mut out);
        enc.close()?;
        let err = enc.write_section("A", &[]).unwrap_err();
        assert!(err.to_string().contains("already closed"));
        Ok(())
    }
}
