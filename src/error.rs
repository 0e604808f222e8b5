use std::error::Error as StdError;
use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

/// Scriptlink's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Scriptlink's crate-wide error type.
///
/// The matching core never fails; this type only surfaces from the filesystem adapters in
/// [`crate::sources`] and from the output encoders.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    /// A filesystem operation on `path` failed.
    #[error("{action} '{}'", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Whether this error comes from a file or directory that does not exist.
    pub fn is_not_found(&self) -> bool {
        let io = match self {
            Self::Io { source, .. } => Some(source),
            Self::Other(err) => err.downcast_ref::<std::io::Error>(),
            Self::Message(_) => None,
        };
        io.is_some_and(|err| err.kind() == ErrorKind::NotFound)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anyhow_errors_keep_their_context_chain() {
        let err = anyhow::anyhow!("disk gone").context("failed to read sheet dump");
        let err = Error::from(err);
        assert_eq!(err.to_string(), "failed to read sheet dump: disk gone");
    }

    #[test]
    fn io_errors_are_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::from(io);
        assert_eq!(err.to_string(), "no such file");
        assert!(err.is_not_found());
    }

    #[test]
    fn io_errors_keep_path_and_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io("failed to read sheet dump", "data/metadata.json", io);

        assert_eq!(
            err.to_string(),
            "failed to read sheet dump 'data/metadata.json'"
        );
        assert!(err.is_not_found());
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("gone"));
    }

    #[test]
    fn other_failures_are_not_not_found() {
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!Error::io("failed to list", "static/audio", denied).is_not_found());
        assert!(!Error::msg("bad sheet").is_not_found());
    }
}
