//! Publish chain ordering, fail-fast and substitution tests.
//!
//! No `git` binary is needed: every test drives the chain through an
//! in-process double.

use std::cell::RefCell;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ax_core::{CommandError, CommandRunner};
use ax_publish::{publish, GitCli, PublishStep, PublishSteps};

const REPO: &str = "git@example.com:me/backups.git";

fn failure(step: PublishStep) -> CommandError {
    CommandError::Failed {
        program: "git".to_string(),
        args: vec![step.to_string()],
        code: Some(128),
        stderr: "fatal: simulated".to_string(),
    }
}

/// Records every step and its arguments; fails at `fail_at`.
#[derive(Default)]
struct Recorder {
    calls: Vec<(PublishStep, Vec<String>)>,
    fail_at: Option<PublishStep>,
}

impl PublishSteps for Recorder {
    fn git(&mut self, step: PublishStep, args: &[OsString]) -> Result<(), CommandError> {
        let args = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        self.calls.push((step, args));
        if self.fail_at == Some(step) {
            return Err(failure(step));
        }
        Ok(())
    }
}

impl Recorder {
    fn steps(&self) -> Vec<PublishStep> {
        self.calls.iter().map(|(s, _)| *s).collect()
    }
}

#[test]
fn runs_all_five_steps_in_order_with_git_arguments() {
    let mut rec = Recorder::default();
    publish(&mut rec, REPO, "nightly").expect("publish");

    assert_eq!(rec.steps(), PublishStep::ALL);
    let args: Vec<Vec<String>> = rec.calls.into_iter().map(|(_, a)| a).collect();
    assert_eq!(
        args,
        vec![
            vec!["init"],
            vec!["remote", "add", "origin", REPO],
            vec!["add", "."],
            vec!["commit", "-m", "nightly"],
            vec!["push", "-u", "origin", "master", "--force"],
        ]
    );
}

#[test]
fn add_remote_failure_stops_the_chain() {
    let mut rec = Recorder {
        fail_at: Some(PublishStep::AddRemote),
        ..Default::default()
    };
    let err = publish(&mut rec, REPO, "msg").unwrap_err();

    assert_eq!(err.step, PublishStep::AddRemote);
    assert!(err.to_string().contains("add remote"), "got: {err}");
    assert_eq!(rec.steps(), [PublishStep::Init, PublishStep::AddRemote]);
}

#[test]
fn every_step_is_reported_when_it_fails() {
    for (i, step) in PublishStep::ALL.into_iter().enumerate() {
        let mut rec = Recorder {
            fail_at: Some(step),
            ..Default::default()
        };
        let err = publish(&mut rec, REPO, "msg").unwrap_err();
        assert_eq!(err.step, step);
        assert_eq!(rec.calls.len(), i + 1, "steps after {step} must not run");
    }
}

/// Treats "nothing to commit" as success, defers everything else.
struct TolerantCommit(Recorder);

impl PublishSteps for TolerantCommit {
    fn git(&mut self, step: PublishStep, args: &[OsString]) -> Result<(), CommandError> {
        self.0.git(step, args)
    }

    fn commit(&mut self, _message: &str) -> Result<(), CommandError> {
        Ok(())
    }
}

#[test]
fn a_single_step_can_be_substituted() {
    let mut steps = TolerantCommit(Recorder {
        fail_at: Some(PublishStep::Commit),
        ..Default::default()
    });
    publish(&mut steps, REPO, "msg").expect("commit override bypasses failure");
    assert_eq!(
        steps.0.steps(),
        [
            PublishStep::Init,
            PublishStep::AddRemote,
            PublishStep::StageAll,
            PublishStep::ForcePush
        ]
    );
}

/// Captures the runner calls made by [`GitCli`].
#[derive(Default)]
struct CapturingRunner {
    seen: RefCell<Vec<(String, Option<PathBuf>)>>,
}

impl CommandRunner for CapturingRunner {
    fn run(&self, program: &str, _args: &[OsString], cwd: Option<&Path>) -> Result<(), CommandError> {
        self.seen
            .borrow_mut()
            .push((program.to_string(), cwd.map(Path::to_path_buf)));
        Ok(())
    }
}

#[test]
fn git_cli_runs_every_step_inside_workdir() {
    let runner = CapturingRunner::default();
    let workdir = tempfile::TempDir::new().unwrap();
    let mut git = GitCli::new(&runner, workdir.path());
    assert_eq!(git.workdir(), workdir.path());

    publish(&mut git, REPO, "msg").expect("publish");

    let seen = runner.seen.borrow();
    assert_eq!(seen.len(), 5);
    assert!(seen
        .iter()
        .all(|(p, cwd)| p == "git" && cwd.as_deref() == Some(workdir.path())));
}
