//! Domain types shared by every `ax` crate.
//!
//! All path fields use `PathBuf`; secrets use [`Passphrase`], which is
//! zeroized on drop and never printed by `Debug`.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Archiver format used when none is configured.
pub const DEFAULT_ARCHIVE_TYPE: &str = "7z";

/// Output directory used when the request leaves it empty.
pub const DEFAULT_OUTPUT_DIR: &str = "tmp_archive";

/// Base archive name used when the request leaves it empty.
pub const DEFAULT_ARCHIVE_NAME: &str = "archive";

/// Highest archiver compression level ("ultra").
pub const MAX_COMPRESSION_LEVEL: u8 = 9;

// ---------------------------------------------------------------------------
// Passphrase
// ---------------------------------------------------------------------------

/// A user-supplied secret. Only ever hashed or handed to the archiver.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Passphrase(String);

impl Passphrase {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Plaintext view, for building the archiver's `-p` flag.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase(***)")
    }
}

impl From<&str> for Passphrase {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for Passphrase {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// BlockSize
// ---------------------------------------------------------------------------

/// Unit of a volume size: bytes, kilobytes, megabytes or gigabytes.
///
/// Deserializes through [`BlockSize::from_letter`], so an unknown letter in
/// the config file is read as Mega instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String")]
pub enum BlockSize {
    #[serde(rename = "b")]
    Byte,
    #[serde(rename = "k")]
    Kilo,
    #[default]
    #[serde(rename = "m")]
    Mega,
    #[serde(rename = "g")]
    Giga,
}

impl BlockSize {
    /// Map a unit letter to a [`BlockSize`]. Anything unrecognised is Mega.
    pub fn from_letter(letter: &str) -> Self {
        match letter {
            "b" => BlockSize::Byte,
            "k" => BlockSize::Kilo,
            "g" => BlockSize::Giga,
            _ => BlockSize::Mega,
        }
    }

    pub fn letter(self) -> char {
        match self {
            BlockSize::Byte => 'b',
            BlockSize::Kilo => 'k',
            BlockSize::Mega => 'm',
            BlockSize::Giga => 'g',
        }
    }
}

impl From<String> for BlockSize {
    fn from(letter: String) -> Self {
        BlockSize::from_letter(&letter)
    }
}

impl fmt::Display for BlockSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Where to read from and where to put the produced volume(s).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArchiveRequest {
    /// Directory to archive. Must exist and be a directory.
    pub path_to_archive: PathBuf,
    /// Directory receiving the volume(s).
    pub output_path: PathBuf,
    /// Base file name of the volume(s), without extension.
    pub new_archive_name: String,
}

impl ArchiveRequest {
    /// Copy of this request with empty output path and name replaced by defaults.
    pub fn resolved(&self) -> ArchiveRequest {
        let output_path = if self.output_path.as_os_str().is_empty() {
            PathBuf::from(DEFAULT_OUTPUT_DIR)
        } else {
            self.output_path.clone()
        };
        let new_archive_name = if self.new_archive_name.is_empty() {
            DEFAULT_ARCHIVE_NAME.to_string()
        } else {
            self.new_archive_name.clone()
        };
        ArchiveRequest {
            path_to_archive: self.path_to_archive.clone(),
            output_path,
            new_archive_name,
        }
    }
}

/// Archiver tuning knobs. `Default` is the "ultra" preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionOptions {
    #[serde(skip)]
    pub password: Option<Passphrase>,
    #[serde(skip)]
    pub apply_password: bool,
    pub archive_type: String,
    pub block_size: Option<BlockSize>,
    /// Size of one volume in `block_size` units. `0` disables splitting.
    pub volume_size: u64,
    pub fast_bytes: u16,
    pub dict_size_mb: u16,
    pub headers_encryption: bool,
    /// 0 (store) to 9 (ultra).
    pub compression_level: u8,
    pub solid_archive: bool,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            password: None,
            apply_password: false,
            archive_type: DEFAULT_ARCHIVE_TYPE.to_string(),
            block_size: Some(BlockSize::Mega),
            volume_size: 90,
            fast_bytes: 64,
            dict_size_mb: 64,
            headers_encryption: true,
            compression_level: MAX_COMPRESSION_LEVEL,
            solid_archive: true,
        }
    }
}

impl CompressionOptions {
    /// Copy with the archive type and volume unit filled in.
    ///
    /// The unit is only defaulted when splitting is enabled.
    pub fn resolved(&self) -> CompressionOptions {
        let mut out = self.clone();
        if out.archive_type.is_empty() {
            out.archive_type = DEFAULT_ARCHIVE_TYPE.to_string();
        }
        if out.volume_size != 0 && out.block_size.is_none() {
            out.block_size = Some(BlockSize::Mega);
        }
        out
    }

    /// The password to pass to the archiver, if one is set and should be applied.
    pub fn effective_password(&self) -> Option<&Passphrase> {
        match &self.password {
            Some(p) if self.apply_password && !p.is_empty() => Some(p),
            _ => None,
        }
    }
}

/// Inputs for the archiver's extract mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractRequest {
    pub password: Option<Passphrase>,
    /// Directory holding the `*.001` first volume; also the extraction target.
    pub extract_path: PathBuf,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
