//! Error types for ax-backup.

use std::path::PathBuf;

use thiserror::Error;

use ax_core::{CommandError, ListError, ValidationError};
use ax_crypt::CodecError;
use ax_publish::PublishError;

/// All errors that can arise from a pipeline run.
///
/// Every variant is fatal for the run; stages that already finished are
/// left as they are on disk.
#[derive(Debug, Error)]
pub enum BackupError {
    /// The source directory failed validation; no archiver was started.
    #[error("path validation issue: {0}")]
    Validation(#[from] ValidationError),

    #[error("failed executing the archiver: {0}")]
    Archiver(#[source] CommandError),

    #[error("failed extracting archive(s): {0}")]
    Extract(#[source] CommandError),

    #[error("listing error: {0}")]
    List(#[from] ListError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The intent requires a passphrase that was not supplied.
    #[error("missing {0} password")]
    MissingCredential(&'static str),
}

/// Convenience constructor for [`BackupError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BackupError {
    BackupError::Io {
        path: path.into(),
        source,
    }
}
