use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("{} is encrypted and needs a password", .path.display())]
    Locked { path: PathBuf },

    #[error("could not decrypt {}", .path.display())]
    Decryption {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("could not parse {} as PDF", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("could not read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} has no pages", .path.display())]
    NoPages { path: PathBuf },
}
