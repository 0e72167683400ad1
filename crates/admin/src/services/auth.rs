//! Shared-password verification.
//!
//! The configured password is never compared byte by byte. Both sides are
//! reduced to HMAC-SHA256 tags under a per-process random key and the tags
//! are compared with `Mac::verify_slice`, which runs in constant time.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Checks submitted passwords against the configured admin password.
#[derive(Clone)]
pub struct PasswordVerifier {
    key: [u8; 32],
    expected: Vec<u8>,
}

impl std::fmt::Debug for PasswordVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordVerifier").finish_non_exhaustive()
    }
}

impl PasswordVerifier {
    /// Build a verifier for `password` with a fresh random key.
    #[must_use]
    pub fn new(password: &SecretString) -> Self {
        let mut key = [0u8; 32];
        let (left, right) = key.split_at_mut(16);
        left.copy_from_slice(Uuid::new_v4().as_bytes());
        right.copy_from_slice(Uuid::new_v4().as_bytes());

        let expected = tag(&key, password.expose_secret()).finalize().into_bytes().to_vec();
        Self { key, expected }
    }

    /// Whether `candidate` matches the configured password.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        tag(&self.key, candidate).verify_slice(&self.expected).is_ok()
    }
}

fn tag(key: &[u8], value: &str) -> HmacSha256 {
    // HMAC accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(value.as_bytes());
    mac
}
