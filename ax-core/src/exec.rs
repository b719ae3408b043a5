//! Blocking external process invocation.
//!
//! Every archiver and git call goes through [`CommandRunner`], so the
//! pipeline can be driven by an in-process double in tests.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::archive::redact_args;
use crate::error::CommandError;

/// Runs an external program to completion.
pub trait CommandRunner {
    /// Run `program` with `args`, optionally inside `cwd`, and block until it
    /// exits. A non-zero exit is an error.
    fn run(&self, program: &str, args: &[OsString], cwd: Option<&Path>) -> Result<(), CommandError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[OsString], cwd: Option<&Path>) -> Result<(), CommandError> {
        (**self).run(program, args, cwd)
    }
}

/// Spawns real processes with [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[OsString], cwd: Option<&Path>) -> Result<(), CommandError> {
        let shown = redact_args(args);
        tracing::debug!(program, args = %shown.join(" "), "exec");

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|source| CommandError::Spawn {
            program: program.to_string(),
            args: shown.clone(),
            source,
        })?;

        if output.status.success() {
            return Ok(());
        }

        Err(CommandError::Failed {
            program: program.to_string(),
            args: shown,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
