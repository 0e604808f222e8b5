//! Local stand-ins for the remote collaborators.
//!
//! A sync step (outside this crate) drops the converted script, the raw sheet dump and the
//! downloaded audio files into a data layout on disk. These helpers read that layout back.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::{Error, Result};

/// File name of the converted script inside the data directory.
pub const SCRIPT_FILE: &str = "script.txt";

/// File name of the sheet dump inside the data directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Where synced inputs live on disk.
#[derive(Debug, Clone)]
pub struct DataLayout {
    /// Holds `script.txt` and `metadata.json`.
    pub data_dir: PathBuf,
    /// Holds the downloaded audio files.
    pub audio_dir: PathBuf,
}

impl Default for DataLayout {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            audio_dir: PathBuf::from("static/audio"),
        }
    }
}

impl DataLayout {
    pub fn script_path(&self) -> PathBuf {
        self.data_dir.join(SCRIPT_FILE)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.data_dir.join(METADATA_FILE)
    }
}

/// Read the script as UTF-8 text.
pub fn load_script(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|err| Error::io("failed to read script", path, err))
}

/// Read a sheet dump: a JSON array of rows, each row an array of cells.
///
/// Sheets export numbers and blanks as non-string cells; these are stringified (`null` becomes
/// an empty string). A row that is not an array becomes an empty row, which the metadata parser
/// then skips as malformed.
pub fn load_sheet_rows(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .map_err(|err| Error::io("failed to read sheet dump", path, err))?;
    parse_sheet_json(&raw)
}

/// Parse the JSON text of a sheet dump. See [`load_sheet_rows`].
pub fn parse_sheet_json(raw: &str) -> Result<Vec<Vec<String>>> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Array(rows) = value else {
        return Err(Error::msg("sheet dump must be a JSON array of rows"));
    };

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(idx, row)| match row {
            Value::Array(cells) => cells.into_iter().map(cell_to_string).collect(),
            other => {
                warn!(row = idx, kind = %json_kind(&other), "sheet row is not an array");
                Vec::new()
            }
        })
        .collect())
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// List the names of regular files in `dir`, sorted.
///
/// A missing directory is treated as "nothing synced yet" and yields an empty list. Sorting
/// keeps the linker's last-one-wins collision handling stable across platforms.
pub fn list_local_files(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "audio directory missing");
            return Ok(Vec::new());
        }
        Err(err) => return Err(Error::io("failed to list", dir, err)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| Error::io("failed to list", dir, err))?;
        let file_type = entry
            .file_type()
            .map_err(|err| Error::io("failed to stat", entry.path(), err))?;
        if !file_type.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => warn!(name = ?raw, "skipping non UTF-8 file name"),
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sheet_json_stringifies_cells() -> anyhow::Result<()> {
        let rows = parse_sheet_json(r#"[["File", "Take"], ["a.WAV", 3, null, true], "bad"]"#)?;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["a.WAV", "3", "", "true"]);
        assert!(rows[2].is_empty());
        Ok(())
    }

    #[test]
    fn parse_sheet_json_rejects_non_array() {
        let err = parse_sheet_json(r#"{"rows": []}"#).unwrap_err();
        assert!(err.to_string().contains("JSON array"));
    }

    #[test]
    fn parse_sheet_json_rejects_invalid_json() {
        assert!(parse_sheet_json("[[").is_err());
    }

    #[test]
    fn list_local_files_skips_dirs_and_sorts() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("b.WAV.MP3"), b"")?;
        fs::write(dir.path().join("a.WAV"), b"")?;
        fs::create_dir(dir.path().join("nested.WAV"))?;

        let names = list_local_files(dir.path())?;
        assert_eq!(names, vec!["a.WAV", "b.WAV.MP3"]);
        Ok(())
    }

    #[test]
    fn list_local_files_missing_dir_is_empty() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let names = list_local_files(dir.path().join("does-not-exist"))?;
        assert!(names.is_empty());
        Ok(())
    }

    #[test]
    fn load_script_reports_missing_file() {
        let err = load_script("/definitely/not/here/script.txt").unwrap_err();
        assert!(err.to_string().contains("failed to read script"));
        assert!(err.is_not_found());
    }

    #[test]
    fn load_sheet_rows_missing_file_is_not_found() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let err = load_sheet_rows(dir.path().join("metadata.json")).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("failed to read sheet dump"));
        Ok(())
    }

    #[test]
    fn malformed_sheet_dump_is_not_a_missing_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("metadata.json");
        fs::write(&path, "not json")?;
        let err = load_sheet_rows(&path).unwrap_err();
        assert!(!err.is_not_found());
        Ok(())
    }

    #[test]
    fn layout_paths_use_conventional_names() {
        let layout = DataLayout::default();
        assert_eq!(layout.script_path(), PathBuf::from("data/script.txt"));
        assert_eq!(layout.metadata_path(), PathBuf::from("data/metadata.json"));
        assert_eq!(layout.audio_dir, PathBuf::from("static/audio"));
    }
}
