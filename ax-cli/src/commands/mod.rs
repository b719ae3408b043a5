pub mod backup;
pub mod extract;
pub mod interactive;

use anyhow::{Context, Result};
use colored::Colorize;

use ax_backup::StageReport;
use ax_core::Passphrase;

/// Read a passphrase from the terminal without echo.
pub fn prompt_passphrase(label: &str) -> Result<Passphrase> {
    let secret = rpassword::prompt_password(format!("{label}: "))
        .with_context(|| format!("failed to read {label}"))?;
    Ok(Passphrase::new(secret))
}

pub fn print_reports(reports: &[StageReport]) {
    for report in reports {
        match report {
            StageReport::Cleaned { path } => {
                println!("{} cleaned {}", "✓".green(), path.display())
            }
            StageReport::Archived { output } => {
                println!("{} archived into {}", "✓".green(), output.display())
            }
            StageReport::Extracted { path } => {
                println!("{} extracted into {}", "✓".green(), path.display())
            }
            StageReport::Encrypted { files } => {
                println!("{} encrypted {} file(s)", "✓".green(), files.len());
                for f in files {
                    println!("  {}", f.output.display().to_string().dimmed());
                }
            }
            StageReport::Decrypted { files } => {
                println!("{} decrypted {} file(s)", "✓".green(), files.len());
                for f in files {
                    println!("  {}", f.output.display().to_string().dimmed());
                }
            }
            StageReport::Published { dir, repo } => {
                println!("{} pushed {} to {}", "✓".green(), dir.display(), repo.bold())
            }
        }
    }
}
