//! Linking clips to local audio files and grouping them by section.
//!
//! Sheet filenames and local filenames disagree on suffixes (`take1.WAV` in the sheet,
//! `take1.WAV.MP3` on disk), so both sides are reduced to a cleaned key before comparison.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::metadata::AudioClip;

/// Suffix patterns removed by [`clean_filename`], in application order.
const KNOWN_SUFFIXES: [&str; 2] = [".WAV.MP3", ".WAV"];

/// URL prefix under which local audio files are served.
pub const DEFAULT_URL_PREFIX: &str = "/static/audio";

/// Linked clips keyed by section label.
pub type SectionMap = BTreeMap<String, Vec<AudioClip>>;

/// Options for building `linked_path` values.
#[derive(Debug, Clone)]
pub struct LinkOpts {
    /// Prepended to the original local filename, joined with `/`.
    pub url_prefix: String,
}

impl Default for LinkOpts {
    fn default() -> Self {
        Self {
            url_prefix: DEFAULT_URL_PREFIX.to_owned(),
        }
    }
}

impl LinkOpts {
    fn linked_path(&self, local_filename: &str) -> String {
        format!(
            "{}/{}",
            self.url_prefix.trim_end_matches('/'),
            local_filename
        )
    }
}

/// Reduce a filename to its comparison key.
///
/// Every `.WAV.MP3` is removed first, then every remaining `.WAV`, then surrounding whitespace.
/// Matching is case-sensitive.
pub fn clean_filename(name: &str) -> String {
    KNOWN_SUFFIXES
        .iter()
        .fold(name.to_owned(), |acc, suffix| acc.replace(*suffix, ""))
        .trim()
        .to_owned()
}

/// Resolve clips against local filenames and group the linked ones by section.
///
/// When several local files clean to the same key, the last one listed wins. Clips with no
/// local file are dropped. Within a section, clips keep their input order.
pub fn organize_by_section<I, S>(
    clips: Vec<AudioClip>,
    local_filenames: I,
    opts: &LinkOpts,
) -> SectionMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // Sequential on purpose: later entries overwrite earlier ones.
    let mut local: HashMap<String, String> = HashMap::new();
    for name in local_filenames {
        let name = name.as_ref();
        if let Some(previous) = local.insert(clean_filename(name), name.to_owned()) {
            debug!(previous = %previous, replacement = name, "local filename collision");
        }
    }

    let mut grouped = SectionMap::new();
    let mut dropped = 0usize;

    for mut clip in clips {
        let key = clean_filename(&clip.filename);
        let Some(actual) = local.get(&key) else {
            debug!(filename = %clip.filename, "no local file for clip");
            dropped += 1;
            continue;
        };

        clip.linked_path = Some(opts.linked_path(actual));
        grouped.entry(clip.section.clone()).or_default().push(clip);
    }

    debug!(
        sections = grouped.len(),
        linked = grouped.values().map(Vec::len).sum::<usize>(),
        dropped,
        "clips linked"
    );

    grouped
}
