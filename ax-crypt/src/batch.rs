//! Batch encryption and decryption over an ordered file list.
//!
//! ## Naming
//!
//! File `i` of an encryption batch is written to `<path>.enc.<i>`.
//! Decryption strips the last two dot-separated segments of the file name
//! (`enc` and the index) to recover the original name.
//!
//! ## Failure policy
//!
//! The key is derived once per batch. Files are processed one at a time:
//! transform, then delete the source. The first error aborts the batch.
//! Files already processed stay processed; nothing is rolled back.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ax_core::Passphrase;

use crate::codec::{decrypt_file, encrypt_file, EncryptionKey};
use crate::error::CodecError;

/// Marker segment between the original name and the batch index.
pub const ENC_MARKER: &str = "enc";

/// One processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    /// File that was read and then removed.
    pub source: PathBuf,
    /// File that was created.
    pub output: PathBuf,
    pub bytes: u64,
}

/// `<path>.enc.<index>`
pub fn ciphertext_path(path: &Path, index: usize) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{ENC_MARKER}.{index}"));
    PathBuf::from(name)
}

/// Inverse of [`ciphertext_path`]: drop the trailing `.enc.<index>`.
pub fn plaintext_path(path: &Path) -> Result<PathBuf, CodecError> {
    let unrecognized = || CodecError::UnrecognizedName {
        path: path.to_path_buf(),
    };
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(unrecognized)?;

    let mut parts = name.rsplitn(3, '.');
    let index = parts.next().ok_or_else(unrecognized)?;
    let marker = parts.next().ok_or_else(unrecognized)?;
    let stem = parts.next().ok_or_else(unrecognized)?;
    if marker != ENC_MARKER || stem.is_empty() || index.parse::<usize>().is_err() {
        return Err(unrecognized());
    }
    Ok(path.with_file_name(stem))
}

/// Encrypt every file in `files`, replacing each with `<file>.enc.<i>`.
pub fn encrypt_all(passphrase: &Passphrase, files: &[PathBuf]) -> Result<Vec<Processed>, CodecError> {
    let key = EncryptionKey::derive(passphrase);
    let mut done = Vec::with_capacity(files.len());
    for (i, source) in files.iter().enumerate() {
        let output = ciphertext_path(source, i);
        let bytes = encrypt_file(&key, source, &output)?;
        remove(source)?;
        tracing::debug!(path = %output.display(), "encrypted");
        done.push(Processed {
            source: source.clone(),
            output,
            bytes,
        });
    }
    tracing::info!(count = done.len(), "encrypted files");
    Ok(done)
}

/// Decrypt every `<name>.enc.<i>` in `files` back to `<name>`.
pub fn decrypt_all(passphrase: &Passphrase, files: &[PathBuf]) -> Result<Vec<Processed>, CodecError> {
    let key = EncryptionKey::derive(passphrase);
    let mut done = Vec::with_capacity(files.len());
    for source in files {
        let output = plaintext_path(source)?;
        let bytes = decrypt_file(&key, source, &output)?;
        remove(source)?;
        tracing::debug!(path = %output.display(), "decrypted");
        done.push(Processed {
            source: source.clone(),
            output,
            bytes,
        });
    }
    tracing::info!(count = done.len(), "decrypted files");
    Ok(done)
}

fn remove(path: &Path) -> Result<(), CodecError> {
    std::fs::remove_file(path).map_err(|source| CodecError::Remove {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
