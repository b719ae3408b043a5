//! `ax extract [PATH]` — unpack `PATH/*.001` into `PATH`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ax_backup::{run, Plan};
use ax_core::{config, ExtractRequest, SystemRunner};

use super::{print_reports, prompt_passphrase};

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Directory holding the first volume; defaults to the configured one.
    pub path: Option<PathBuf>,
}

impl ExtractArgs {
    pub fn run(self) -> Result<()> {
        let config = config::load().context("failed to load configuration")?;
        let extract_path = self.path.unwrap_or(config.paths.extract);

        let password = prompt_passphrase("Archive password (blank for none)")?;
        let plan = Plan::Extract(ExtractRequest {
            password: Some(password),
            extract_path,
        });

        let reports = run(&SystemRunner, &plan).context("extraction failed")?;
        print_reports(&reports);
        Ok(())
    }
}
