//! Error types for sx.

use std::path::PathBuf;

/// Result type alias using sx Error.
pub type Result<T> = std::result::Result<T, Error>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Broad classes of failure, used to pick an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The version query does not resolve against the catalog.
    Query,
    /// The request conflicts with the installed store.
    State,
    /// A download, page fetch or external process failed.
    Transport,
    /// The catalog file is missing or malformed.
    Persistence,
    /// A filesystem primitive failed.
    Filesystem,
    /// Invalid configuration or environment.
    Config,
}

/// Structured error type for sx.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid version {query}")]
    InvalidVersionQuery { query: String },

    #[error("cannot find any matches for version {query}")]
    NoMatchingVersionSet { query: String },

    #[error("cannot find snapshot {snapshot} of version {base}")]
    SnapshotNotFound { base: String, snapshot: String },

    #[error("cannot find version {version} (did you mean to use a snapshot?)")]
    ReleaseNotFound { version: String },

    #[error("{name} is already installed")]
    AlreadyInstalled { name: String, path: PathBuf },

    #[error("{name} has not been installed")]
    NotInstalled { name: String, path: PathBuf },

    #[error("cannot remove {name}: it is the currently active version")]
    CannotRemoveActive { name: String, path: PathBuf },

    #[error("error downloading {url}: {message}")]
    DownloadFailed {
        url: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("{tool} failed while extracting {}", archive.display())]
    ExtractionFailed {
        tool: String,
        archive: PathBuf,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("error retrieving {url}: {message}")]
    FetchFailed {
        url: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("version list unavailable at {}: {message} (run `sx update` first)", path.display())]
    CatalogUnavailable {
        message: String,
        path: PathBuf,
        #[source]
        source: Option<BoxError>,
    },

    #[error("unrecognized entry in version store: {name}")]
    UnrecognizedInstall { name: String, path: PathBuf },

    #[error("configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<BoxError>,
    },

    #[error("{message} {}: {source}", path.display())]
    Io {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("program not found: {program}")]
    ToolMissing {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidVersionQuery { .. }
            | Error::NoMatchingVersionSet { .. }
            | Error::SnapshotNotFound { .. }
            | Error::ReleaseNotFound { .. } => ErrorKind::Query,
            Error::AlreadyInstalled { .. }
            | Error::NotInstalled { .. }
            | Error::CannotRemoveActive { .. }
            | Error::UnrecognizedInstall { .. } => ErrorKind::State,
            Error::DownloadFailed { .. }
            | Error::ExtractionFailed { .. }
            | Error::FetchFailed { .. }
            | Error::ToolMissing { .. } => ErrorKind::Transport,
            Error::CatalogUnavailable { .. } => ErrorKind::Persistence,
            Error::Io { .. } | Error::Other(_) => ErrorKind::Filesystem,
            Error::Config { .. } => ErrorKind::Config,
        }
    }

    /// The filesystem path this error is about, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::AlreadyInstalled { path, .. }
            | Error::NotInstalled { path, .. }
            | Error::CannotRemoveActive { path, .. }
            | Error::UnrecognizedInstall { path, .. }
            | Error::CatalogUnavailable { path, .. }
            | Error::Io { path, .. }
            | Error::ExtractionFailed { archive: path, .. } => Some(path),
            Error::Config { path, .. } => path.as_deref(),
            _ => None,
        }
    }

    /// Create an I/O error for a filesystem primitive.
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            message: message.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create a download error from any transport failure.
    pub fn download(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::DownloadFailed {
            url: url.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a page fetch error from any transport failure.
    pub fn fetch(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::FetchFailed {
            url: url.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}
