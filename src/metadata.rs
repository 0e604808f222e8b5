//! Parsing of the audio-take metadata sheet.
//!
//! The sheet is positional: `filename, person, start, stop, section, (reserved), quote`.
//! Row 0 is the header and is always discarded.

use serde::Serialize;
use tracing::debug;

const FILENAME: usize = 0;
const PERSON: usize = 1;
const START: usize = 2;
const STOP: usize = 3;
const SECTION: usize = 4;
const QUOTE: usize = 6;

/// One recorded take described by a metadata row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioClip {
    /// File name as authored in the sheet.
    pub filename: String,
    pub person: String,
    /// Timecodes are kept verbatim.
    pub start: String,
    pub stop: String,
    pub section: String,
    /// Quote the take is supposed to represent. Empty when the sheet has no quote column.
    pub quote: String,
    /// Set by the linker once the clip has been resolved to a local file.
    pub linked_path: Option<String>,
}

/// Column layout of a single sheet row, decided once from its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLayout {
    /// Filename through section (5 or 6 cells).
    Basic,
    /// Basic columns plus a quote at index 6.
    Extended,
}

impl ColumnLayout {
    /// Pick the layout for a row with `width` cells, or `None` for a malformed row.
    pub fn from_width(width: usize) -> Option<Self> {
        if width > QUOTE {
            Some(Self::Extended)
        } else if width > SECTION {
            Some(Self::Basic)
        } else {
            None
        }
    }
}

impl AudioClip {
    /// Build a clip from one data row. Rows narrower than five cells yield `None`.
    pub fn from_row<S: AsRef<str>>(row: &[S]) -> Option<Self> {
        let layout = ColumnLayout::from_width(row.len())?;
        let cell = |idx: usize| row[idx].as_ref().to_owned();

        let quote = match layout {
            ColumnLayout::Basic => String::new(),
            ColumnLayout::Extended => cell(QUOTE),
        };

        Some(Self {
            filename: cell(FILENAME),
            person: cell(PERSON),
            start: cell(START),
            stop: cell(STOP),
            section: cell(SECTION),
            quote,
            linked_path: None,
        })
    }
}

/// Parse sheet rows into clips, in row order.
///
/// The first row is a header. Malformed rows are skipped silently (logged at debug level) so a
/// ragged sheet never aborts the batch. Clips are not deduplicated.
pub fn parse_sheet_rows<R, S>(rows: &[R]) -> Vec<AudioClip>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    rows.iter()
        .enumerate()
        .skip(1)
        .filter_map(|(idx, row)| {
            let row: &[S] = row.as_ref();
            let clip = AudioClip::from_row(row);
            if clip.is_none() {
                debug!(row = idx, cells = row.len(), "skipping malformed sheet row");
            }
            clip
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<String> {
        ["File Name", "Person", "Start", "Stop", "Section", "Notes", "Quote"]
            .iter()
            .map(|s| (*s).to_owned())
            .collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn extended_row_carries_quote() {
        let rows = vec![
            header(),
            row(&["a.wav", "Bob", "00:01", "00:02", "SceneA", "opt", "Some quote"]),
        ];
        let clips = parse_sheet_rows(&rows);

        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].filename, "a.wav");
        assert_eq!(clips[0].person, "Bob");
        assert_eq!(clips[0].start, "00:01");
        assert_eq!(clips[0].stop, "00:02");
        assert_eq!(clips[0].section, "SceneA");
        assert_eq!(clips[0].quote, "Some quote");
        assert_eq!(clips[0].linked_path, None);
    }

    #[test]
    fn short_rows_are_dropped_and_basic_rows_have_empty_quote() {
        let rows = vec![
            header(),
            row(&["a.wav", "Bob", "00:01", "00:02"]),
            row(&["b.wav", "Ann", "00:03", "00:04", "SceneB"]),
            row(&["c.wav", "Ann", "00:05", "00:06", "SceneB", "reserved"]),
        ];
        let clips = parse_sheet_rows(&rows);

        assert_eq!(clips.len(), 2);
        assert_eq!(clips[0].filename, "b.wav");
        assert_eq!(clips[0].quote, "");
        assert_eq!(clips[1].filename, "c.wav");
        assert_eq!(clips[1].quote, "");
    }

    #[test]
    fn header_is_discarded_even_when_it_looks_like_data() {
        let rows = vec![
            row(&["x.wav", "P", "0", "1", "S", "", "q"]),
            row(&["y.wav", "P", "0", "1", "S", "", "q"]),
        ];
        let clips = parse_sheet_rows(&rows);
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].filename, "y.wav");
    }

    #[test]
    fn duplicates_are_kept_in_row_order() {
        let rows = vec![
            header(),
            row(&["take.wav", "A", "0", "1", "S1"]),
            row(&["take.wav", "B", "2", "3", "S2"]),
        ];
        let clips = parse_sheet_rows(&rows);
        assert_eq!(clips.len(), 2);
        assert_eq!(clips[0].person, "A");
        assert_eq!(clips[1].person, "B");
    }

    #[test]
    fn empty_and_header_only_sheets_yield_nothing() {
        let empty: Vec<Vec<String>> = Vec::new();
        assert!(parse_sheet_rows(&empty).is_empty());
        assert!(parse_sheet_rows(&[header()]).is_empty());
    }

    #[test]
    fn cells_are_kept_verbatim() {
        let rows = vec![
            header(),
            row(&[" a.WAV ", "Bob", "not a time", "", "Scene A", "", "  quote  "]),
        ];
        let clips = parse_sheet_rows(&rows);
        assert_eq!(clips[0].filename, " a.WAV ");
        assert_eq!(clips[0].start, "not a time");
        assert_eq!(clips[0].quote, "  quote  ");
    }

    #[test]
    fn layout_is_decided_from_width() {
        assert_eq!(ColumnLayout::from_width(0), None);
        assert_eq!(ColumnLayout::from_width(4), None);
        assert_eq!(ColumnLayout::from_width(5), Some(ColumnLayout::Basic));
        assert_eq!(ColumnLayout::from_width(6), Some(ColumnLayout::Basic));
        assert_eq!(ColumnLayout::from_width(7), Some(ColumnLayout::Extended));
        assert_eq!(ColumnLayout::from_width(12), Some(ColumnLayout::Extended));
    }
}
