//! `ax [flags]` — archive, encrypt, decrypt or the full backup.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use ax_backup::{run, Credentials, Invocation, Plan};
use ax_core::{
    config::{self, Config, PLACEHOLDER_GIT_REPO},
    resolve, ArchiveRequest, IntentFlags, ResolvedIntent, SystemRunner,
};
use ax_publish::default_commit_message;

use super::{print_reports, prompt_passphrase};

/// `on` / `off` switch for the archive password.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Toggle {
    #[default]
    On,
    Off,
}

/// Flags of the default (no subcommand) mode.
#[derive(Args, Debug, Default)]
pub struct BackupArgs {
    /// Directory to archive.
    #[arg(long = "arc-in", value_name = "PATH")]
    pub arc_in: Option<PathBuf>,

    /// Protect the archive with a password.
    #[arg(long = "arc-pass", value_enum, default_value_t = Toggle::On)]
    pub arc_pass: Toggle,

    /// Directory receiving the archive volume(s).
    #[arg(long = "arc-out", value_name = "PATH")]
    pub arc_out: Option<PathBuf>,

    /// Base name of the archive volume(s).
    #[arg(long = "arc-name", value_name = "NAME")]
    pub arc_name: Option<String>,

    /// Encrypt every file in PATH and stop.
    #[arg(long = "enc-in", value_name = "PATH")]
    pub enc_in: Option<PathBuf>,

    /// Decrypt every file in PATH and stop.
    #[arg(long = "dec-in", value_name = "PATH")]
    pub dec_in: Option<PathBuf>,

    /// Repository the encrypted volumes are force-pushed to.
    #[arg(long = "git-repo", value_name = "URL")]
    pub git_repo: Option<String>,

    /// Commit message for the publish step.
    #[arg(long, short = 'm', value_name = "MSG")]
    pub message: Option<String>,
}

impl BackupArgs {
    pub fn run(self) -> Result<()> {
        let config = config::load().context("failed to load configuration")?;
        let repo_url = self
            .git_repo
            .clone()
            .unwrap_or_else(|| config.git.repo.clone());

        let intent = resolve(self.intent_flags(&repo_url));
        tracing::debug!(?intent, "resolved intent");
        let credentials = collect_credentials(&intent)?;

        let invocation = self.into_invocation(config, intent, repo_url, credentials);
        let plan = Plan::from_invocation(invocation)?;
        let reports = run(&SystemRunner, &plan).context(describe(&plan))?;
        print_reports(&reports);
        Ok(())
    }

    fn intent_flags(&self, repo_url: &str) -> IntentFlags {
        IntentFlags {
            archive_password_default_on: self.arc_pass == Toggle::On,
            encryption_requested: self.enc_in.is_some(),
            decryption_requested: self.dec_in.is_some(),
            publish_repo_overridden: repo_url != PLACEHOLDER_GIT_REPO,
        }
    }

    fn into_invocation(
        self,
        config: Config,
        intent: ResolvedIntent,
        repo_url: String,
        credentials: Credentials,
    ) -> Invocation {
        let Config {
            compression,
            paths,
            git,
        } = config;
        let commit_message = self
            .message
            .or(git.commit_message)
            .unwrap_or_else(|| default_commit_message(chrono::Utc::now()));

        Invocation {
            intent,
            request: ArchiveRequest {
                path_to_archive: self.arc_in.unwrap_or(paths.archive_in),
                output_path: self.arc_out.unwrap_or(paths.archive_out),
                new_archive_name: self.arc_name.unwrap_or(paths.archive_name),
            },
            compression,
            encrypt_in: self.enc_in.unwrap_or(paths.encrypt_in),
            decrypt_in: self.dec_in.unwrap_or(paths.decrypt_in),
            repo_url,
            commit_message,
            credentials,
        }
    }
}

/// Ask for each password the intent needs: archive, then encrypt, then decrypt.
fn collect_credentials(intent: &ResolvedIntent) -> Result<Credentials> {
    let mut credentials = Credentials::default();
    if intent.need_archive_password {
        credentials.archive = Some(prompt_passphrase("Archive password")?);
    }
    if intent.need_encrypt_password {
        credentials.encrypt = Some(prompt_passphrase("Encryption password")?);
    }
    if intent.need_decrypt_password {
        credentials.decrypt = Some(prompt_passphrase("Decryption password")?);
    }
    Ok(credentials)
}

fn describe(plan: &Plan) -> &'static str {
    match plan {
        Plan::Backup(_) => "backup failed",
        Plan::Archive { .. } => "archiving failed",
        Plan::Encrypt { .. } => "encryption failed",
        Plan::Decrypt { .. } => "decryption failed",
        Plan::Extract(_) => "extraction failed",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
