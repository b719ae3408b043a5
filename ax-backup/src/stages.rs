//! Individual pipeline stages.
//!
//! Each stage does one thing and returns a [`StageReport`]. They share no
//! state; the caller sequences them and stops at the first error.

use std::path::{Path, PathBuf};

use ax_core::{
    archive::{self, ARCHIVER},
    listing, ArchiveRequest, CommandRunner, CompressionOptions, ExtractRequest, Passphrase,
};
use ax_crypt::Processed;
use ax_publish::{publish, GitCli};

use crate::error::{io_err, BackupError};

/// What a completed stage did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageReport {
    /// The output directory was removed (or was already absent).
    Cleaned { path: PathBuf },
    /// The archiver wrote volume(s) into `output`.
    Archived { output: PathBuf },
    /// Archive volume(s) were unpacked into `path`.
    Extracted { path: PathBuf },
    Encrypted { files: Vec<Processed> },
    Decrypted { files: Vec<Processed> },
    /// `dir` was force-pushed to `repo`.
    Published { dir: PathBuf, repo: String },
}

/// Remove `dir` and everything under it. A missing directory is fine.
pub fn cleanup(dir: &Path) -> Result<StageReport, BackupError> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => tracing::info!(path = %dir.display(), "removed previous output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(io_err(dir, e)),
    }
    Ok(StageReport::Cleaned {
        path: dir.to_path_buf(),
    })
}

/// Validate the source directory, then run the archiver's add mode.
pub fn archive<R>(
    runner: &R,
    request: &ArchiveRequest,
    options: &CompressionOptions,
) -> Result<StageReport, BackupError>
where
    R: CommandRunner + ?Sized,
{
    archive::validate_source(&request.path_to_archive)?;

    let args = archive::build_archive_args(request, options);
    runner
        .run(ARCHIVER, &args, None)
        .map_err(BackupError::Archiver)?;

    let output = request.resolved().output_path;
    tracing::info!(output = %output.display(), "finished archiving");
    Ok(StageReport::Archived { output })
}

/// Run the archiver's extract mode.
pub fn extract<R>(runner: &R, request: &ExtractRequest) -> Result<StageReport, BackupError>
where
    R: CommandRunner + ?Sized,
{
    let args = archive::build_extract_args(request);
    runner
        .run(ARCHIVER, &args, None)
        .map_err(BackupError::Extract)?;

    tracing::info!(path = %request.extract_path.display(), "finished extracting");
    Ok(StageReport::Extracted {
        path: request.extract_path.clone(),
    })
}

/// Encrypt every file under `dir`.
pub fn encrypt_dir(dir: &Path, passphrase: &Passphrase) -> Result<StageReport, BackupError> {
    let files = listing::list_files(dir)?;
    let files = ax_crypt::encrypt_all(passphrase, &files)?;
    Ok(StageReport::Encrypted { files })
}

/// Decrypt every file under `dir`.
pub fn decrypt_dir(dir: &Path, passphrase: &Passphrase) -> Result<StageReport, BackupError> {
    let files = listing::list_files(dir)?;
    let files = ax_crypt::decrypt_all(passphrase, &files)?;
    Ok(StageReport::Decrypted { files })
}

/// Publish `dir` to `repo` with every git process running inside `dir`.
pub fn publish_dir<R>(
    runner: &R,
    dir: &Path,
    repo: &str,
    message: &str,
) -> Result<StageReport, BackupError>
where
    R: CommandRunner + ?Sized,
{
    let mut git = GitCli::new(runner, dir);
    publish(&mut git, repo, message)?;
    tracing::info!(dir = %git.workdir().display(), repo, "pushed backup");
    Ok(StageReport::Published {
        dir: dir.to_path_buf(),
        repo: repo.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn cleanup_removes_existing_tree() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        fs::create_dir_all(out.join("nested")).unwrap();
        fs::write(out.join("nested").join("old.7z.001"), "stale").unwrap();

        let report = cleanup(&out).unwrap();
        assert_eq!(report, StageReport::Cleaned { path: out.clone() });
        assert!(!out.exists());
    }

    #[test]
    fn cleanup_of_missing_directory_succeeds() {
        let tmp = TempDir::new().unwrap();
        cleanup(&tmp.path().join("never-created")).expect("absent dir is fine");
    }
}
