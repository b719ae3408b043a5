//! Whole-file AES-256 stream cipher in output-feedback (OFB) mode.
//!
//! ## Key and keystream
//!
//! - The key is SHA-256 of the passphrase bytes, used directly as the
//!   AES-256 key. Same passphrase, same key.
//! - The IV is sixteen zero bytes for every file and every call.
//!
//! OFB is its own inverse, so [`encrypt_file`] and [`decrypt_file`] run the
//! same transform; they are kept separate for readability at call sites.
//!
//! ## Known weakness
//!
//! With a fixed IV the keystream depends only on the key. Two files
//! encrypted under one passphrase are XORed with the same keystream at the
//! same offsets, so XORing the ciphertexts yields the XOR of the
//! plaintexts. This is kept for compatibility with existing backups; a
//! per-file random nonce stored alongside the ciphertext would fix it but
//! changes the on-disk format.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use aes::Aes256;
use ofb::cipher::{KeyIvInit, StreamCipher};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use ax_core::Passphrase;

use crate::error::{read_err, write_err, CodecError};

type Aes256Ofb = ofb::Ofb<Aes256>;

/// Length of an AES-256 key in bytes.
pub const KEY_LEN: usize = 32;

const ZERO_IV: [u8; 16] = [0u8; 16];

/// Streaming buffer size.
const CHUNK: usize = 64 * 1024;

/// Permission bits of every file the codec creates.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o600;

// ---------------------------------------------------------------------------
// EncryptionKey
// ---------------------------------------------------------------------------

/// A 256-bit cipher key. Recomputed per operation, wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey([u8; KEY_LEN]);

impl EncryptionKey {
    /// SHA-256 of the passphrase bytes.
    pub fn derive(passphrase: &Passphrase) -> Self {
        let digest = Sha256::digest(passphrase.as_bytes());
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&digest);
        Self(key)
    }

    /// Wrap raw key bytes, rejecting anything that is not [`KEY_LEN`] long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        let key: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| CodecError::InvalidKeyLength { len: bytes.len() })?;
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    fn keystream(&self) -> Result<Aes256Ofb, CodecError> {
        Aes256Ofb::new_from_slices(&self.0, &ZERO_IV)
            .map_err(|_| CodecError::InvalidKeyLength { len: self.0.len() })
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EncryptionKey(***)")
    }
}

// ---------------------------------------------------------------------------
// File transforms
// ---------------------------------------------------------------------------

/// Encrypt `input` into a freshly created `output`. Returns bytes written.
pub fn encrypt_file(key: &EncryptionKey, input: &Path, output: &Path) -> Result<u64, CodecError> {
    transform(key, input, output)
}

/// Decrypt `input` into a freshly created `output`. Returns bytes written.
pub fn decrypt_file(key: &EncryptionKey, input: &Path, output: &Path) -> Result<u64, CodecError> {
    transform(key, input, output)
}

fn transform(key: &EncryptionKey, input: &Path, output: &Path) -> Result<u64, CodecError> {
    let mut cipher = key.keystream()?;
    let mut src = File::open(input).map_err(|e| read_err(input, e))?;
    let mut dst = create_output(output).map_err(|e| write_err(output, e))?;

    let mut buf = vec![0u8; CHUNK];
    let mut total = 0u64;
    loop {
        let n = match src.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(read_err(input, e)),
        };
        cipher.apply_keystream(&mut buf[..n]);
        dst.write_all(&buf[..n]).map_err(|e| write_err(output, e))?;
        total += n as u64;
    }
    dst.flush().map_err(|e| write_err(output, e))?;
    buf.zeroize();

    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        bytes = total,
        "transformed file"
    );
    Ok(total)
}

fn create_output(path: &Path) -> std::io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(OUTPUT_MODE);
    }
    opts.open(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn key(p: &str) -> EncryptionKey {
        EncryptionKey::derive(&Passphrase::from(p))
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 31 % 251) as u8).collect()
    }

    #[test]
    fn derivation_is_deterministic_and_passphrase_sensitive() {
        assert_eq!(key("pw").as_bytes(), key("pw").as_bytes());
        assert_ne!(key("pw").as_bytes(), key("pw2").as_bytes());
    }

    #[test]
    fn derivation_is_sha256_of_passphrase() {
        // SHA-256("abc")
        let expected = [
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad,
        ];
        assert_eq!(key("abc").as_bytes(), &expected);
    }

    #[rstest]
    #[case(0)]
    #[case(31)]
    #[case(32)]
    fn key_length_is_enforced(#[case] len: usize) {
        let bytes = vec![7u8; len];
        match EncryptionKey::from_slice(&bytes) {
            Ok(_) if len == KEY_LEN => {}
            Err(CodecError::InvalidKeyLength { len: got }) => assert_eq!(got, len),
            other => panic!("unexpected result for {len} bytes: {other:?}"),
        }
    }

    #[test]
    fn debug_does_not_print_key_material() {
        assert_eq!(format!("{:?}", key("pw")), "EncryptionKey(***)");
    }

    #[rstest]
    #[case::empty(0)]
    #[case::one_byte(1)]
    #[case::partial_block(15)]
    #[case::one_block(16)]
    #[case::spans_chunks(CHUNK * 2 + 7)]
    fn round_trip_restores_bytes(#[case] len: usize) {
        let tmp = TempDir::new().unwrap();
        let plain = tmp.path().join("plain.bin");
        let enc = tmp.path().join("plain.bin.enc.0");
        let back = tmp.path().join("back.bin");
        let data = pattern(len);
        fs::write(&plain, &data).unwrap();

        let k = key("correct horse");
        assert_eq!(encrypt_file(&k, &plain, &enc).unwrap(), len as u64);
        assert_eq!(decrypt_file(&k, &enc, &back).unwrap(), len as u64);

        let ciphertext = fs::read(&enc).unwrap();
        assert_eq!(ciphertext.len(), len);
        if len >= 15 {
            assert_ne!(ciphertext, data);
        }
        assert_eq!(fs::read(&back).unwrap(), data);
    }

    #[test]
    fn streaming_matches_single_pass_keystream() {
        let tmp = TempDir::new().unwrap();
        let plain = tmp.path().join("p");
        let enc = tmp.path().join("c");
        let data = pattern(CHUNK + 1000);
        fs::write(&plain, &data).unwrap();

        let k = key("pw");
        encrypt_file(&k, &plain, &enc).unwrap();

        let mut expected = data.clone();
        Aes256Ofb::new_from_slices(k.as_bytes(), &ZERO_IV)
            .unwrap()
            .apply_keystream(&mut expected);
        assert_eq!(fs::read(&enc).unwrap(), expected);
    }

    #[test]
    fn output_is_deterministic_for_same_key_and_plaintext() {
        let tmp = TempDir::new().unwrap();
        let plain = tmp.path().join("p");
        fs::write(&plain, b"same bytes every time").unwrap();

        let k = key("pw");
        encrypt_file(&k, &plain, &tmp.path().join("c1")).unwrap();
        encrypt_file(&k, &plain, &tmp.path().join("c2")).unwrap();
        assert_eq!(
            fs::read(tmp.path().join("c1")).unwrap(),
            fs::read(tmp.path().join("c2")).unwrap()
        );
    }

    #[test]
    fn fixed_iv_reuses_keystream_across_files() {
        let tmp = TempDir::new().unwrap();
        let p1 = b"attack at dawn!!".to_vec();
        let p2 = b"retreat at noon.".to_vec();
        fs::write(tmp.path().join("p1"), &p1).unwrap();
        fs::write(tmp.path().join("p2"), &p2).unwrap();

        let k = key("shared");
        encrypt_file(&k, &tmp.path().join("p1"), &tmp.path().join("c1")).unwrap();
        encrypt_file(&k, &tmp.path().join("p2"), &tmp.path().join("c2")).unwrap();
        let c1 = fs::read(tmp.path().join("c1")).unwrap();
        let c2 = fs::read(tmp.path().join("c2")).unwrap();

        let cipher_xor: Vec<u8> = c1.iter().zip(&c2).map(|(a, b)| a ^ b).collect();
        let plain_xor: Vec<u8> = p1.iter().zip(&p2).map(|(a, b)| a ^ b).collect();
        assert_eq!(cipher_xor, plain_xor);
    }

    #[test]
    fn wrong_passphrase_does_not_restore_plaintext() {
        let tmp = TempDir::new().unwrap();
        let plain = tmp.path().join("p");
        fs::write(&plain, b"secret notes").unwrap();
        encrypt_file(&key("right"), &plain, &tmp.path().join("c")).unwrap();
        decrypt_file(&key("wrong"), &tmp.path().join("c"), &tmp.path().join("d")).unwrap();
        assert_ne!(fs::read(tmp.path().join("d")).unwrap(), b"secret notes");
    }

    #[test]
    fn existing_output_is_truncated() {
        let tmp = TempDir::new().unwrap();
        let plain = tmp.path().join("p");
        let out = tmp.path().join("c");
        fs::write(&plain, b"ab").unwrap();
        fs::write(&out, vec![0u8; 100]).unwrap();
        encrypt_file(&key("pw"), &plain, &out).unwrap();
        assert_eq!(fs::metadata(&out).unwrap().len(), 2);
    }

    #[test]
    #[cfg(unix)]
    fn output_is_owner_read_write_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let plain = tmp.path().join("p");
        let out = tmp.path().join("c");
        fs::write(&plain, b"x").unwrap();
        encrypt_file(&key("pw"), &plain, &out).unwrap();
        let mode = fs::metadata(&out).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn missing_input_is_a_read_error_and_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("c");
        let err = encrypt_file(&key("pw"), &tmp.path().join("absent"), &out).unwrap_err();
        assert!(matches!(err, CodecError::Read { .. }), "got: {err}");
        assert!(!out.exists());
    }
}
