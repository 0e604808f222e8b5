//! Script segmentation.
//!
//! A script is a flat sequence of lines. Header lines (starting with a section marker such as
//! `SCENE`) open a new section; every other non-empty line becomes one [`ScriptSegment`] tagged
//! with the section that was open at that point.

use serde::Serialize;
use tracing::debug;

/// Section label used for lines that appear before the first header.
pub const INITIAL_SECTION: &str = "INTRO";

/// Keywords that mark a line as a section header.
pub const DEFAULT_SECTION_MARKERS: [&str; 3] = ["SCENE", "SECTION", "INTRO"];

/// Speaker labels must be shorter than this many characters.
const MAX_SPEAKER_LABEL_CHARS: usize = 20;

/// One spoken or narrated unit of the script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptSegment {
    /// The header line of the section this segment belongs to.
    pub section: String,
    /// Speaker label when the line starts with an all-caps `LABEL:` prefix.
    pub speaker: Option<String>,
    /// Dialogue or narration. May be empty for a bare `LABEL:` line.
    pub text: String,
}

/// Options controlling how script lines are classified.
#[derive(Debug, Clone)]
pub struct SegmentOpts {
    /// A trimmed line starting with any of these opens a new section.
    pub section_markers: Vec<String>,
}

impl Default for SegmentOpts {
    fn default() -> Self {
        Self {
            section_markers: DEFAULT_SECTION_MARKERS
                .iter()
                .map(|m| (*m).to_owned())
                .collect(),
        }
    }
}

impl SegmentOpts {
    fn is_header(&self, line: &str) -> bool {
        self.section_markers
            .iter()
            .any(|marker| line.starts_with(marker.as_str()))
    }
}

/// Segment a whole script, splitting it on line boundaries first.
pub fn segment_script(text: &str, opts: &SegmentOpts) -> Vec<ScriptSegment> {
    segment_lines(text.split('\n'), opts)
}

/// Segment an already split sequence of script lines.
///
/// The currently open section is threaded through the fold as part of the accumulator, so the
/// result depends on nothing but `lines` and `opts`.
pub fn segment_lines<I, S>(lines: I, opts: &SegmentOpts) -> Vec<ScriptSegment>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (_, segments) = lines.into_iter().fold(
        (INITIAL_SECTION.to_owned(), Vec::new()),
        |(section, mut segments), line| {
            let line = line.as_ref().trim();
            if line.is_empty() {
                return (section, segments);
            }

            if opts.is_header(line) {
                debug!(section = line, "entering section");
                return (line.to_owned(), segments);
            }

            let (speaker, text) = split_speaker(line);
            segments.push(ScriptSegment {
                section: section.clone(),
                speaker: speaker.map(str::to_owned),
                text: text.to_owned(),
            });
            (section, segments)
        },
    );

    segments
}

/// Split `LABEL: text` into its speaker and text parts.
///
/// Only the first colon counts. The label must be shorter than 20 characters and upper-case
/// (at least one cased character, none lower-case), otherwise the whole line is text.
fn split_speaker(line: &str) -> (Option<&str>, &str) {
    let Some((label, rest)) = line.split_once(':') else {
        return (None, line);
    };

    if label.chars().count() < MAX_SPEAKER_LABEL_CHARS && is_upper_label(label) {
        (Some(label.trim()), rest.trim())
    } else {
        (None, line)
    }
}

fn is_upper_label(label: &str) -> bool {
    label.chars().any(char::is_uppercase) && !label.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(lines: &[&str]) -> Vec<ScriptSegment> {
        segment_lines(lines.iter().copied(), &SegmentOpts::default())
    }

    #[test]
    fn header_sets_section_and_speaker_lines_split() {
        let segs = segment(&["SCENE 1", "NARRATOR: It begins.", "Just text."]);

        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].section, "SCENE 1");
        assert_eq!(segs[0].speaker.as_deref(), Some("NARRATOR"));
        assert_eq!(segs[0].text, "It begins.");
        assert_eq!(segs[1].section, "SCENE 1");
        assert_eq!(segs[1].speaker, None);
        assert_eq!(segs[1].text, "Just text.");
    }

    #[test]
    fn lines_before_first_header_belong_to_intro() {
        let segs = segment(&["Opening narration.", "SECTION Two", "More."]);
        assert_eq!(segs[0].section, INITIAL_SECTION);
        assert_eq!(segs[1].section, "SECTION Two");
    }

    #[test]
    fn blank_lines_and_headers_emit_nothing() {
        let segs = segment(&["", "   ", "SCENE 4", "\t", "INTRO again"]);
        assert!(segs.is_empty());
    }

    #[test]
    fn lines_are_trimmed_before_classification() {
        let segs = segment(&["   SCENE 9  ", "  HOST:   Welcome back.  "]);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].section, "SCENE 9");
        assert_eq!(segs[0].speaker.as_deref(), Some("HOST"));
        assert_eq!(segs[0].text, "Welcome back.");
    }

    #[test]
    fn bare_label_keeps_empty_text() {
        let segs = segment(&["NARRATOR:"]);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].speaker.as_deref(), Some("NARRATOR"));
        assert_eq!(segs[0].text, "");
    }

    #[test]
    fn mixed_case_or_long_labels_are_not_speakers() {
        let segs = segment(&[
            "Note: this is narration.",
            "A VERY LONG SPEAKER LABEL: too long",
            "Time 10:30 is when it starts.",
        ]);
        assert!(segs.iter().all(|s| s.speaker.is_none()));
        assert_eq!(segs[0].text, "Note: this is narration.");
        assert_eq!(segs[1].text, "A VERY LONG SPEAKER LABEL: too long");
    }

    #[test]
    fn label_rules_follow_case_and_length() {
        assert_eq!(split_speaker("DR. SMITH 2: Hi"), (Some("DR. SMITH 2"), "Hi"));
        assert_eq!(split_speaker("12: numbers only"), (None, "12: numbers only"));
        assert_eq!(split_speaker(": no label"), (None, ": no label"));
        // 19 characters is still short enough.
        assert_eq!(
            split_speaker("ABCDEFGHIJKLMNOPQRS: ok"),
            (Some("ABCDEFGHIJKLMNOPQRS"), "ok")
        );
        assert_eq!(
            split_speaker("ABCDEFGHIJKLMNOPQRST: no"),
            (None, "ABCDEFGHIJKLMNOPQRST: no")
        );
    }

    #[test]
    fn only_first_colon_splits() {
        let segs = segment(&["HOST: Meet at 10:30: sharp."]);
        assert_eq!(segs[0].speaker.as_deref(), Some("HOST"));
        assert_eq!(segs[0].text, "Meet at 10:30: sharp.");
    }

    #[test]
    fn custom_markers_replace_defaults() {
        let opts = SegmentOpts {
            section_markers: vec!["ACT".to_owned()],
        };
        let segs = segment_script("ACT I\nSCENE 1\nLine.", &opts);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].section, "ACT I");
        assert_eq!(segs[0].text, "SCENE 1");
        assert_eq!(segs[1].section, "ACT I");
    }

    #[test]
    fn crlf_scripts_segment_like_lf_scripts() {
        let segs = segment_script("SCENE 1\r\nNARRATOR: Hi.\r\n", &SegmentOpts::default());
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].section, "SCENE 1");
        assert_eq!(segs[0].text, "Hi.");
    }
}
