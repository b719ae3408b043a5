//! # ax-backup
//!
//! Stage sequencing for the `ax` pipeline.
//!
//! Build a [`Plan`] from a resolved intent with [`Plan::from_invocation`],
//! then execute it with [`run`]. The individual stages live in [`stages`]
//! and can be driven on their own.

pub mod error;
pub mod pipeline;
pub mod stages;

pub use error::BackupError;
pub use pipeline::{run, run_backup, BackupPlan, Credentials, Invocation, Plan};
pub use stages::StageReport;
