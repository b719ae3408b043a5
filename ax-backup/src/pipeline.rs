//! Pipeline entrypoint shared by every `ax` mode.
//!
//! [`Plan::from_invocation`] turns a resolved intent plus its inputs into
//! exactly one plan; [`run`] executes it.
//!
//! ## Full backup sequence
//!
//! 1. Remove the output directory (unconditional, destructive).
//! 2. Validate the source and run the archiver.
//! 3. Encrypt every file in the output directory.
//! 4. Publish the output directory.
//!
//! A failing stage aborts the run. Nothing is compensated: if encryption
//! fails after archiving, the volumes stay on disk unencrypted.

use std::path::PathBuf;

use ax_core::{
    ArchiveRequest, CommandRunner, CompressionOptions, ExtractRequest, Passphrase, ResolvedIntent,
};

use crate::error::BackupError;
use crate::stages::{self, StageReport};

/// Passphrases collected by the front end, each only when asked for.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub archive: Option<Passphrase>,
    pub encrypt: Option<Passphrase>,
    pub decrypt: Option<Passphrase>,
}

/// Everything one invocation resolved to.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub intent: ResolvedIntent,
    pub request: ArchiveRequest,
    pub compression: CompressionOptions,
    /// Directory whose files are encrypted in an encrypt-only run.
    pub encrypt_in: PathBuf,
    /// Directory whose files are decrypted in a decrypt-only run.
    pub decrypt_in: PathBuf,
    pub repo_url: String,
    pub commit_message: String,
    pub credentials: Credentials,
}

/// Inputs of a full archive → encrypt → publish run.
#[derive(Debug, Clone)]
pub struct BackupPlan {
    pub request: ArchiveRequest,
    pub compression: CompressionOptions,
    pub passphrase: Passphrase,
    pub repo_url: String,
    pub commit_message: String,
}

/// One runnable pipeline shape.
#[derive(Debug, Clone)]
pub enum Plan {
    Backup(BackupPlan),
    Archive {
        request: ArchiveRequest,
        compression: CompressionOptions,
    },
    Encrypt {
        dir: PathBuf,
        passphrase: Passphrase,
    },
    Decrypt {
        dir: PathBuf,
        passphrase: Passphrase,
    },
    Extract(ExtractRequest),
}

impl Plan {
    /// Pick the plan for `inv`.
    ///
    /// Decryption wins over everything else, then the combined backup, then
    /// encrypt-only, then archive-only.
    pub fn from_invocation(inv: Invocation) -> Result<Plan, BackupError> {
        let Invocation {
            intent,
            request,
            mut compression,
            encrypt_in,
            decrypt_in,
            repo_url,
            commit_message,
            credentials,
        } = inv;

        if intent.run_decrypt {
            let passphrase = credentials
                .decrypt
                .ok_or(BackupError::MissingCredential("decryption"))?;
            return Ok(Plan::Decrypt {
                dir: decrypt_in,
                passphrase,
            });
        }

        compression.password = credentials.archive;
        compression.apply_password = intent.need_archive_password;
        if intent.need_archive_password && compression.password.is_none() {
            return Err(BackupError::MissingCredential("archive"));
        }

        if intent.is_combined() {
            let passphrase = credentials
                .encrypt
                .ok_or(BackupError::MissingCredential("encryption"))?;
            return Ok(Plan::Backup(BackupPlan {
                request,
                compression,
                passphrase,
                repo_url,
                commit_message,
            }));
        }

        if intent.run_encrypt {
            let passphrase = credentials
                .encrypt
                .ok_or(BackupError::MissingCredential("encryption"))?;
            return Ok(Plan::Encrypt {
                dir: encrypt_in,
                passphrase,
            });
        }

        Ok(Plan::Archive {
            request,
            compression,
        })
    }
}

/// Run `plan`, returning one report per completed stage.
pub fn run<R>(runner: &R, plan: &Plan) -> Result<Vec<StageReport>, BackupError>
where
    R: CommandRunner + ?Sized,
{
    match plan {
        Plan::Backup(backup) => run_backup(runner, backup),
        Plan::Archive {
            request,
            compression,
        } => Ok(vec![stages::archive(runner, request, compression)?]),
        Plan::Encrypt { dir, passphrase } => Ok(vec![stages::encrypt_dir(dir, passphrase)?]),
        Plan::Decrypt { dir, passphrase } => Ok(vec![stages::decrypt_dir(dir, passphrase)?]),
        Plan::Extract(request) => Ok(vec![stages::extract(runner, request)?]),
    }
}

/// Cleanup → archive → encrypt → publish.
pub fn run_backup<R>(runner: &R, plan: &BackupPlan) -> Result<Vec<StageReport>, BackupError>
where
    R: CommandRunner + ?Sized,
{
    let output = plan.request.resolved().output_path;
    let mut reports = Vec::with_capacity(4);

    reports.push(stages::cleanup(&output)?);
    reports.push(stages::archive(runner, &plan.request, &plan.compression)?);
    reports.push(stages::encrypt_dir(&output, &plan.passphrase)?);
    reports.push(stages::publish_dir(
        runner,
        &output,
        &plan.repo_url,
        &plan.commit_message,
    )?);

    tracing::info!(source = %plan.request.path_to_archive.display(), "backup complete");
    Ok(reports)
}
