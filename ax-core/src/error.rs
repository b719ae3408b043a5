//! Error types for ax-core.

use std::path::PathBuf;

use thiserror::Error;

/// Source-path checks run before any archiver process is started.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("path can not be empty")]
    EmptyPath,

    #[error("failed getting stat for {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

/// An external process could not be started or exited unsuccessfully.
///
/// `args` is the attempted argument list with password flags redacted.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{program}: failed spawning the command with args {args:?}: {source}")]
    Spawn {
        program: String,
        args: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    #[error("{program}: command with args {args:?} exited with {}: {stderr}", exit_label(.code))]
    Failed {
        program: String,
        args: Vec<String>,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Errors loading `~/.ax/config.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed YAML; carries the file path and serde_yaml's line context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Well-formed YAML holding a value outside its allowed range.
    #[error("invalid {field} in config at {path}: {reason}")]
    Invalid {
        path: PathBuf,
        field: &'static str,
        reason: String,
    },

    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

/// Directory walk failures from [`crate::listing`].
#[derive(Debug, Error)]
#[error("failed walking path {path}: {source}")]
pub struct ListError {
    pub path: PathBuf,
    #[source]
    pub source: walkdir::Error,
}
