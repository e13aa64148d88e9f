//! Errors from reading and writing `config.ron`.

use std::path::PathBuf;

/// A config file operation failed. Every variant names the file involved.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the file, or creating its directory, failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid RON for [`Config`](crate::Config).
    #[error("invalid config in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize config for {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: ron::Error,
    },
}
