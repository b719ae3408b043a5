//! ax core library — domain types, mode resolution, archiver arguments,
//! process execution, file listing and configuration.
//!
//! - [`types`] — requests, compression options, passphrases
//! - [`intent`] — [`resolve`] flags into a [`ResolvedIntent`]
//! - [`archive`] — 7-Zip argument builders and source validation
//! - [`exec`] — [`CommandRunner`] and the process-spawning [`SystemRunner`]
//! - [`listing`] — ordered regular-file listing
//! - [`config`] — `~/.ax/config.yaml` loading
//! - [`error`] — error types

pub mod archive;
pub mod config;
pub mod error;
pub mod exec;
pub mod intent;
pub mod listing;
pub mod types;

pub use error::{CommandError, ConfigError, ListError, ValidationError};
pub use exec::{CommandRunner, SystemRunner};
pub use intent::{resolve, IntentFlags, ResolvedIntent};
pub use types::{ArchiveRequest, BlockSize, CompressionOptions, ExtractRequest, Passphrase};
