//! Mode resolution: which passwords to ask for and which stages to run.
//!
//! The resolver is a pure function over four independent flags produced by
//! the command-line parser.
//!
//! | encrypt | decrypt | publish & archive-default-on | archive pwd | encrypt pwd | decrypt pwd |
//! |---------|---------|------------------------------|-------------|-------------|-------------|
//! | no      | no      | no                           | if default-on | no        | no          |
//! | yes     | no      | any                          | no          | yes         | no          |
//! | no      | yes     | any                          | no          | no          | yes         |
//! | no      | no      | yes                          | yes         | yes         | no          |
//!
//! Encrypt and decrypt requested together: decryption is the stage that
//! runs, but the encryption password is still asked for. The two are not
//! merged into one prompt.

/// Raw intent as parsed from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntentFlags {
    /// The "protect archive with password" toggle is at its default (on).
    pub archive_password_default_on: bool,
    pub encryption_requested: bool,
    pub decryption_requested: bool,
    /// A repository other than the placeholder default was given.
    pub publish_repo_overridden: bool,
}

/// Credentials and stages required by one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedIntent {
    pub need_archive_password: bool,
    pub need_encrypt_password: bool,
    pub need_decrypt_password: bool,
    pub run_archive: bool,
    pub run_encrypt: bool,
    pub run_decrypt: bool,
    pub run_publish: bool,
}

impl ResolvedIntent {
    /// Archive, encrypt and publish in one go.
    pub fn is_combined(&self) -> bool {
        self.run_archive && self.run_encrypt && self.run_publish
    }
}

/// Resolve [`IntentFlags`] into a [`ResolvedIntent`].
pub fn resolve(flags: IntentFlags) -> ResolvedIntent {
    let IntentFlags {
        archive_password_default_on: archive_on,
        encryption_requested: encrypt,
        decryption_requested: decrypt,
        publish_repo_overridden: publish,
    } = flags;

    let plain = !encrypt && !decrypt;
    let combined = plain && publish && archive_on;

    ResolvedIntent {
        need_archive_password: plain && archive_on,
        need_encrypt_password: encrypt || combined,
        need_decrypt_password: decrypt,
        run_archive: plain,
        run_encrypt: (encrypt && !decrypt) || combined,
        run_decrypt: decrypt,
        run_publish: combined,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
