//! # ax-crypt
//!
//! Whole-file AES-256-OFB codec and its batch wrappers.
//!
//! Call [`encrypt_all`] to replace a list of files with `<file>.enc.<i>`
//! ciphertext siblings, and [`decrypt_all`] to reverse it.

pub mod batch;
pub mod codec;
pub mod error;

pub use batch::{ciphertext_path, decrypt_all, encrypt_all, plaintext_path, Processed};
pub use codec::{decrypt_file, encrypt_file, EncryptionKey};
pub use error::CodecError;
