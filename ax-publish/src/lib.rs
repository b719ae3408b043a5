//! # ax-publish
//!
//! Pushes a directory of backup files to a remote git repository with a
//! fixed five-step chain: init, add remote, stage, commit, force-push.
//!
//! Call [`publish`] with any [`PublishSteps`] implementation; [`GitCli`]
//! is the one that shells out to `git`.

pub mod chain;
pub mod error;

pub use chain::{default_commit_message, publish, GitCli, PublishStep, PublishSteps};
pub use error::PublishError;
