//! Error types for startup data loading.

use std::path::PathBuf;

/// Failures while reading the game's data and config files.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// A required file or directory does not exist.
    #[error("missing asset: {}", path.display())]
    MissingAsset { path: PathBuf },

    /// The file exists but could not be read.
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not valid RON for its type.
    #[error("could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}
