//! Error types for ax-publish.

use thiserror::Error;

use ax_core::CommandError;

use crate::chain::PublishStep;

/// A publish step failed; later steps were not attempted.
#[derive(Debug, Error)]
#[error("publish failed at step '{step}': {source}")]
pub struct PublishError {
    pub step: PublishStep,
    #[source]
    pub source: CommandError,
}
