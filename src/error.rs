//! Error types for the fallible edges of the menu: configuration files,
//! the song catalog and the system browser.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("songs directory {0:?} does not exist")]
    MissingDirectory(PathBuf),
    #[error("failed to scan {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to open a URI in the desktop browser.
///
/// The two cases are reported differently: an unsupported platform is a
/// user notification, an I/O failure goes to the error reporter.
#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("browsing is not supported on this system")]
    Unsupported,
    #[error("failed to launch browser: {0}")]
    Io(#[from] std::io::Error),
}
