use crate::Result;
use crate::metadata::AudioClip;

/// Streaming sink for grouped sections.
///
/// Encoders receive one section at a time, in the order the caller chooses, and must stay valid
/// output after `close()` even if no section was written.
pub trait SectionEncoder {
    fn write_section(&mut self, section: &str, clips: &[AudioClip]) -> Result<()>;

    /// Finish the output. Calling this more than once is a no-op.
    fn close(&mut self) -> Result<()>;
}

/// Write every section of `sections` through `encoder`, then close it.
pub fn write_sections<'a, I, E>(sections: I, encoder: &mut E) -> Result<()>
where
    I: IntoIterator<Item = (&'a String, &'a Vec<AudioClip>)>,
    E: SectionEncoder + ?Sized,
{
    for (section, clips) in sections {
        encoder.write_section(section, clips)?;
    }
    encoder.close()
}
