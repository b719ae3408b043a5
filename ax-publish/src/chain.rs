//! The publish chain.
//!
//! ```text
//! git init
//! git remote add origin <repo>
//! git add .
//! git commit -m <message>
//! git push -u origin master --force
//! ```
//!
//! The order is fixed. The first failing step aborts the chain and is named
//! in the returned [`PublishError`]. Nothing is undone: a half-initialised
//! repository is left as it is, and the next run's force-push wins.
//!
//! Every step is a default method on [`PublishSteps`] built on the single
//! required [`PublishSteps::git`] hook, so an implementation can replace any
//! one step and keep the rest.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use ax_core::{CommandError, CommandRunner};

use crate::error::PublishError;

/// Version-control executable.
pub const GIT: &str = "git";

const REMOTE: &str = "origin";
const BRANCH: &str = "master";

// ---------------------------------------------------------------------------
// PublishStep
// ---------------------------------------------------------------------------

/// One git operation of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublishStep {
    Init,
    AddRemote,
    StageAll,
    Commit,
    ForcePush,
}

impl PublishStep {
    /// Every step, in execution order.
    pub const ALL: [PublishStep; 5] = [
        PublishStep::Init,
        PublishStep::AddRemote,
        PublishStep::StageAll,
        PublishStep::Commit,
        PublishStep::ForcePush,
    ];
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishStep::Init => write!(f, "init"),
            PublishStep::AddRemote => write!(f, "add remote"),
            PublishStep::StageAll => write!(f, "stage"),
            PublishStep::Commit => write!(f, "commit"),
            PublishStep::ForcePush => write!(f, "force-push"),
        }
    }
}

// ---------------------------------------------------------------------------
// PublishSteps
// ---------------------------------------------------------------------------

/// Executor for the five steps.
pub trait PublishSteps {
    /// Run one git invocation on behalf of `step`.
    fn git(&mut self, step: PublishStep, args: &[OsString]) -> Result<(), CommandError>;

    fn init(&mut self) -> Result<(), CommandError> {
        self.git(PublishStep::Init, &os_args(&["init"]))
    }

    fn add_remote(&mut self, repo_url: &str) -> Result<(), CommandError> {
        self.git(
            PublishStep::AddRemote,
            &os_args(&["remote", "add", REMOTE, repo_url]),
        )
    }

    fn stage_all(&mut self) -> Result<(), CommandError> {
        self.git(PublishStep::StageAll, &os_args(&["add", "."]))
    }

    fn commit(&mut self, message: &str) -> Result<(), CommandError> {
        self.git(PublishStep::Commit, &os_args(&["commit", "-m", message]))
    }

    fn force_push(&mut self) -> Result<(), CommandError> {
        self.git(
            PublishStep::ForcePush,
            &os_args(&["push", "-u", REMOTE, BRANCH, "--force"]),
        )
    }
}

fn os_args(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

/// Runs each step as a `git` process inside `workdir`.
#[derive(Debug)]
pub struct GitCli<R> {
    runner: R,
    workdir: PathBuf,
}

impl<R: CommandRunner> GitCli<R> {
    pub fn new(runner: R, workdir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl<R: CommandRunner> PublishSteps for GitCli<R> {
    fn git(&mut self, _step: PublishStep, args: &[OsString]) -> Result<(), CommandError> {
        self.runner.run(GIT, args, Some(&self.workdir))
    }
}

// ---------------------------------------------------------------------------
// publish
// ---------------------------------------------------------------------------

/// Run the chain against `repo_url`, stopping at the first failure.
pub fn publish<S>(steps: &mut S, repo_url: &str, message: &str) -> Result<(), PublishError>
where
    S: PublishSteps + ?Sized,
{
    for step in PublishStep::ALL {
        let result = match step {
            PublishStep::Init => steps.init(),
            PublishStep::AddRemote => steps.add_remote(repo_url),
            PublishStep::StageAll => steps.stage_all(),
            PublishStep::Commit => steps.commit(message),
            PublishStep::ForcePush => steps.force_push(),
        };
        result.map_err(|source| PublishError { step, source })?;
        tracing::info!(%step, "publish step done");
    }
    Ok(())
}

/// Commit message used when none is configured.
pub fn default_commit_message(at: DateTime<Utc>) -> String {
    format!("ax backup {}", at.format("%Y-%m-%d %H:%M:%S UTC"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
