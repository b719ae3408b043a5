//! Argument synthesis for the external 7-Zip archiver.
//!
//! Both builders are pure: they take resolved copies of their inputs and
//! never touch caller state, so identical inputs give identical arguments.
//!
//! Add mode:
//!
//! ```text
//! a [-mhe=on] [-p<password>] -t<type> [-mx=<0-9>] [-mfb=<n>] [-md=<n>m]
//!   [-v<n><unit>] [-ms=on] <outDir>/<name>.<type> <sourcePath>
//! ```
//!
//! Extract mode:
//!
//! ```text
//! x [-p<password>] <extractPath>/*.001 -o<extractPath>
//! ```

use std::ffi::OsString;
use std::path::Path;

use crate::error::ValidationError;
use crate::types::{ArchiveRequest, CompressionOptions, ExtractRequest};

/// Name of the archiver executable.
pub const ARCHIVER: &str = "7z";

/// Glob matching the first volume of a split archive.
const FIRST_VOLUME_GLOB: &str = "*.001";

/// Check that `path` is non-empty and names an existing directory.
pub fn validate_source(path: &Path) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::EmptyPath);
    }
    let meta = std::fs::metadata(path).map_err(|source| ValidationError::Stat {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(ValidationError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Build the argument list for the archiver's add operation.
pub fn build_archive_args(request: &ArchiveRequest, options: &CompressionOptions) -> Vec<OsString> {
    let request = request.resolved();
    let options = options.resolved();
    let mut args: Vec<OsString> = vec!["a".into()];

    if options.headers_encryption {
        args.push("-mhe=on".into());
    }
    if let Some(password) = options.effective_password() {
        args.push(format!("-p{}", password.expose()).into());
    }
    args.push(format!("-t{}", options.archive_type).into());
    if options.compression_level != 0 {
        args.push(format!("-mx={}", options.compression_level).into());
    }
    if options.fast_bytes != 0 {
        args.push(format!("-mfb={}", options.fast_bytes).into());
    }
    if options.dict_size_mb != 0 {
        args.push(format!("-md={}m", options.dict_size_mb).into());
    }
    if options.volume_size != 0 {
        let unit = options.block_size.unwrap_or_default();
        args.push(format!("-v{}{}", options.volume_size, unit).into());
    }
    if options.solid_archive {
        args.push("-ms=on".into());
    }

    let file_name = format!("{}.{}", request.new_archive_name, options.archive_type);
    args.push(request.output_path.join(file_name).into_os_string());
    args.push(request.path_to_archive.into_os_string());
    args
}

/// Build the argument list for the archiver's extract operation.
///
/// The password flag is only emitted for a non-empty password.
pub fn build_extract_args(request: &ExtractRequest) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["x".into()];
    if let Some(password) = request.password.as_ref().filter(|p| !p.is_empty()) {
        args.push(format!("-p{}", password.expose()).into());
    }
    args.push(request.extract_path.join(FIRST_VOLUME_GLOB).into_os_string());

    let mut out = OsString::from("-o");
    out.push(request.extract_path.as_os_str());
    args.push(out);
    args
}

/// Render arguments for logs and errors, masking any `-p<password>` flag.
pub fn redact_args(args: &[OsString]) -> Vec<String> {
    args.iter()
        .map(|a| {
            let s = a.to_string_lossy();
            if s.starts_with("-p") && s.len() > 2 {
                "-p***".to_string()
            } else {
                s.into_owned()
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
