/// The supported output formats for grouped sections and diagnostics reports.
///
/// Why this exists:
/// - We want a single, strongly-typed representation of output formats
///   across the CLI, the server and library code.
/// - Using an enum avoids stringly-typed conditionals and keeps format
///   selection explicit and discoverable.
///
/// Integration notes:
/// - With the `cli` feature, `ValueEnum` allows this enum to be used directly as a flag.
/// - Each variant maps to a concrete `SectionEncoder` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputType {
    /// Output sections as a JSON array.
    Json,

    /// Output sections as indented plain text.
    #[default]
    Text,
}

impl OutputType {
    /// Parse a user-supplied format name, case-insensitively.
    pub fn parse(raw: &str) -> crate::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            other => Err(crate::Error::msg(format!(
                "unknown output type '{other}' (expected 'json' or 'text')"
            ))),
        }
    }
}
