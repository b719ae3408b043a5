//! Ordered listing of the regular files under a directory.
//!
//! Directories are skipped, as is anything inside a `.git` directory. Entries
//! are sorted by file name at every level, so the batch ordinals handed to
//! the codec are stable across runs.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ListError;

const VCS_DIR: &str = ".git";

/// List every regular file under `root`, depth first, in file-name order.
pub fn list_files(root: &Path) -> Result<Vec<PathBuf>, ListError> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || e.file_name() != VCS_DIR);

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| ListError {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    tracing::debug!(root = %root.display(), count = files.len(), "listed files");
    Ok(files)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;

    use super::*;

    #[test]
    fn lists_files_in_name_order_and_skips_git() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("b.7z.002").write_str("2").unwrap();
        dir.child("a.7z.001").write_str("1").unwrap();
        dir.child("nested/c.txt").write_str("3").unwrap();
        dir.child(".git/config").write_str("[core]").unwrap();
        dir.child(".git/objects/ab/cdef").write_str("obj").unwrap();

        let files = list_files(dir.path()).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("a.7z.001"),
                PathBuf::from("b.7z.002"),
                PathBuf::from("nested").join("c.txt"),
            ]
        );
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let dir = assert_fs::TempDir::new().unwrap();
        assert!(list_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_an_error_naming_the_path() {
        let dir = assert_fs::TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = list_files(&missing).unwrap_err();
        assert_eq!(err.path, missing);
    }
}
