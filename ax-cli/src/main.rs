//! ax — archive, encrypt and publish a directory in one go.
//!
//! # Usage
//!
//! ```text
//! ax [--arc-in PATH] [--arc-pass on|off] [--arc-out PATH] [--arc-name NAME]
//!    [--enc-in PATH] [--dec-in PATH] [--git-repo URL] [--message MSG] [-v]
//! ax extract [PATH]
//! ax interactive
//! ```
//!
//! With no mode flag, `ax` archives `--arc-in` into `--arc-out`. When the
//! archive password is on and a real repository is given, the volumes are
//! also encrypted and force-pushed. `--enc-in` and `--dec-in` switch to the
//! stand-alone encrypt and decrypt modes. `ax interactive` asks for each
//! setting in turn instead.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use commands::{backup::BackupArgs, extract::ExtractArgs, interactive::InteractiveArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "ax",
    version,
    about = "Archive, encrypt and publish a directory",
    long_about = None,
    args_conflicts_with_subcommands = true,
)]
struct Cli {
    /// Log every file and process invocation.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(flatten)]
    backup: BackupArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Unpack a split archive in place.
    Extract(ExtractArgs),

    /// Prompt for source, output and repository, then back up.
    Interactive(InteractiveArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Some(Commands::Extract(args)) => args.run(),
        Some(Commands::Interactive(args)) => args.run(),
        None => cli.backup.run(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
