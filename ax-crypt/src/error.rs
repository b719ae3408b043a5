//! Error types for ax-crypt.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while encrypting or decrypting files.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The key handed to the cipher is not 32 bytes long.
    #[error("cipher initialisation failed: key must be 32 bytes, got {len}")]
    InvalidKeyLength { len: usize },

    #[error("failed reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source file was transformed but could not be deleted afterwards.
    #[error("failed removing processed file {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file passed to decryption does not end in `.enc.<index>`.
    #[error("not an encrypted file name (expected `<name>.enc.<index>`): {path}")]
    UnrecognizedName { path: PathBuf },
}

pub(crate) fn read_err(path: impl Into<PathBuf>, source: std::io::Error) -> CodecError {
    CodecError::Read {
        path: path.into(),
        source,
    }
}

pub(crate) fn write_err(path: impl Into<PathBuf>, source: std::io::Error) -> CodecError {
    CodecError::Write {
        path: path.into(),
        source,
    }
}
