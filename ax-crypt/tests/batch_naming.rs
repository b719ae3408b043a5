//! Batch encrypt/decrypt behaviour against a real directory.

use std::fs;
use std::path::PathBuf;

use assert_fs::prelude::*;
use ax_core::{listing::list_files, Passphrase};
use ax_crypt::{decrypt_all, encrypt_all, CodecError};
use predicates::prelude::*;

fn seed(dir: &assert_fs::TempDir) -> Vec<PathBuf> {
    dir.child("a").write_str("alpha").unwrap();
    dir.child("b").write_str("bravo").unwrap();
    dir.child("c").write_str("charlie").unwrap();
    vec![dir.path().join("a"), dir.path().join("b"), dir.path().join("c")]
}

#[test]
fn encrypt_names_files_by_batch_position() {
    let dir = assert_fs::TempDir::new().unwrap();
    let files = seed(&dir);

    let done = encrypt_all(&Passphrase::from("pw"), &files).unwrap();
    assert_eq!(done.len(), 3);

    for (name, idx) in [("a", 0), ("b", 1), ("c", 2)] {
        dir.child(name).assert(predicate::path::missing());
        dir.child(format!("{name}.enc.{idx}"))
            .assert(predicate::path::is_file());
    }
}

#[test]
fn decrypt_restores_original_names_and_bytes() {
    let dir = assert_fs::TempDir::new().unwrap();
    let files = seed(&dir);
    let pw = Passphrase::from("pw");

    encrypt_all(&pw, &files).unwrap();
    let encrypted = list_files(dir.path()).unwrap();
    assert_eq!(encrypted.len(), 3);

    decrypt_all(&pw, &encrypted).unwrap();

    dir.child("a").assert("alpha");
    dir.child("b").assert("bravo");
    dir.child("c").assert("charlie");
    for name in ["a.enc.0", "b.enc.1", "c.enc.2"] {
        dir.child(name).assert(predicate::path::missing());
    }
}

#[test]
fn encryption_failure_stops_the_batch_without_rollback() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("a").write_str("alpha").unwrap();
    dir.child("c").write_str("charlie").unwrap();
    let files = vec![
        dir.path().join("a"),
        dir.path().join("missing"),
        dir.path().join("c"),
    ];

    let err = encrypt_all(&Passphrase::from("pw"), &files).unwrap_err();
    assert!(matches!(err, CodecError::Read { .. }), "got: {err}");
    assert!(err.to_string().contains("missing"));

    // First file stays encrypted, third is never touched.
    dir.child("a").assert(predicate::path::missing());
    dir.child("a.enc.0").assert(predicate::path::is_file());
    dir.child("c").assert("charlie");
    dir.child("c.enc.2").assert(predicate::path::missing());
}

#[test]
fn decryption_stops_at_first_unrecognised_name() {
    let dir = assert_fs::TempDir::new().unwrap();
    let pw = Passphrase::from("pw");
    dir.child("a").write_str("alpha").unwrap();
    encrypt_all(&pw, &[dir.path().join("a")]).unwrap();
    dir.child("notes.txt").write_str("plain").unwrap();

    let files = vec![dir.path().join("a.enc.0"), dir.path().join("notes.txt")];
    let err = decrypt_all(&pw, &files).unwrap_err();
    assert!(matches!(err, CodecError::UnrecognizedName { .. }), "got: {err}");

    dir.child("a").assert("alpha");
    dir.child("notes.txt").assert("plain");
}

#[test]
fn ciphertext_is_unreadable_as_plaintext() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("doc").write_str("the quick brown fox").unwrap();
    encrypt_all(&Passphrase::from("pw"), &[dir.path().join("doc")]).unwrap();

    let bytes = fs::read(dir.path().join("doc.enc.0")).unwrap();
    assert_eq!(bytes.len(), "the quick brown fox".len());
    assert_ne!(bytes, b"the quick brown fox");
}
