//! Error types for Chroma.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// What went wrong during a filesystem operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsErrorKind {
    /// The path does not exist.
    NotFound,
    /// The process lacks permission for the path.
    PermissionDenied,
    /// The file exceeds the configured size limit.
    TooLarge,
    /// The file is not valid UTF-8.
    InvalidEncoding,
    /// Any other read failure.
    Read,
    /// Any write, create or rename failure.
    Write,
}

/// The main error type for Chroma operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem error tied to a specific path.
    #[error("{message}{}", cause(.source))]
    FileSystem {
        kind: FsErrorKind,
        message: String,
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },
}

fn cause(source: &Option<std::io::Error>) -> String {
    source.as_ref().map(|e| format!(": {e}")).unwrap_or_default()
}

impl Error {
    /// Create a filesystem error for `path`.
    pub fn fs(
        kind: FsErrorKind,
        message: impl Into<String>,
        path: impl AsRef<Path>,
        source: Option<std::io::Error>,
    ) -> Self {
        Self::FileSystem {
            kind,
            message: message.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn fs_kind(&self) -> FsErrorKind {
        match self {
            Self::FileSystem { kind, .. } => *kind,
        }
    }

    /// The path this error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::FileSystem { path, .. } => path,
        }
    }
}

/// Result type alias using Chroma's Error.
pub type Result<T> = std::result::Result<T, Error>;
