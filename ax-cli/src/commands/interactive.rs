//! `ax interactive` — guided archive, encrypt and push.
//!
//! Asks line by line for the source, the output directory and the
//! repository; a blank answer keeps the configured default. Passwords are
//! read without echo. The encryption password may reuse the archive one.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ax_backup::{run, Credentials, Invocation, Plan};
use ax_core::{
    config::{self, Config, PLACEHOLDER_GIT_REPO},
    resolve, ArchiveRequest, IntentFlags, Passphrase, SystemRunner,
};
use ax_publish::default_commit_message;

use super::{print_reports, prompt_passphrase};

/// Answer that reuses the archive password for encryption.
const ANSWER_NO: &str = "no";

#[derive(Args, Debug)]
pub struct InteractiveArgs {}

impl InteractiveArgs {
    pub fn run(self) -> Result<()> {
        let config = config::load().context("failed to load configuration")?;

        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout();
        let invocation = read_invocation(&mut input, &mut out, &mut TerminalSecrets, config)?;

        let plan = Plan::from_invocation(invocation)?;
        let reports = run(&SystemRunner, &plan).context("backup failed")?;
        print_reports(&reports);
        Ok(())
    }
}

/// Source of hidden input.
pub trait SecretPrompt {
    fn secret(&mut self, label: &str) -> Result<Passphrase>;
}

/// Reads from the terminal with echo disabled.
pub struct TerminalSecrets;

impl SecretPrompt for TerminalSecrets {
    fn secret(&mut self, label: &str) -> Result<Passphrase> {
        prompt_passphrase(label)
    }
}

/// Run the guided prompts and assemble an [`Invocation`].
///
/// Without a repository other than the placeholder, only the archive is
/// built and no encryption password is asked for.
pub fn read_invocation<R, W, S>(
    input: &mut R,
    out: &mut W,
    secrets: &mut S,
    config: Config,
) -> Result<Invocation>
where
    R: BufRead,
    W: Write,
    S: SecretPrompt + ?Sized,
{
    let Config {
        compression,
        paths,
        git,
    } = config;

    writeln!(out, "Blank answers keep the default shown in brackets.")?;
    let source = ask(input, out, "Path to archive", &paths.archive_in.display().to_string())?;
    let output = ask(input, out, "Output path", &paths.archive_out.display().to_string())?;
    let repo_url = ask(input, out, "Git repository", &git.repo)?;

    let intent = resolve(IntentFlags {
        archive_password_default_on: true,
        publish_repo_overridden: repo_url != PLACEHOLDER_GIT_REPO,
        ..Default::default()
    });

    writeln!(out, "Passwords are hidden while typing.")?;
    let archive = secrets.secret("Archive password")?;
    let encrypt = if intent.need_encrypt_password {
        let answer = ask(input, out, "Use a different password for encryption? (yes/no)", "yes")?;
        if answer.eq_ignore_ascii_case(ANSWER_NO) {
            Some(archive.clone())
        } else {
            Some(secrets.secret("Encryption password")?)
        }
    } else {
        None
    };

    let output = PathBuf::from(output);
    Ok(Invocation {
        intent,
        request: ArchiveRequest {
            path_to_archive: PathBuf::from(source),
            output_path: output.clone(),
            new_archive_name: paths.archive_name,
        },
        compression,
        encrypt_in: output,
        decrypt_in: paths.decrypt_in,
        repo_url,
        commit_message: git
            .commit_message
            .unwrap_or_else(|| default_commit_message(chrono::Utc::now())),
        credentials: Credentials {
            archive: Some(archive),
            encrypt,
            decrypt: None,
        },
    })
}

/// Print `label`, read one line, and fall back to `default` when blank.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str, default: &str) -> Result<String> {
    write!(out, "{label} [{default}]: ")?;
    out.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .with_context(|| format!("failed to read answer for '{label}'"))?;
    let answer = line.trim();
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
