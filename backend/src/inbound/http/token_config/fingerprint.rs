//! Token secret fingerprinting for operational visibility.
//!
//! Operators compare the logged fingerprint across replicas to confirm they
//! share one signing secret without the secret itself reaching the logs.

use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the SHA-256 of `secret`, as 16 lowercase hex characters.
///
/// # Examples
///
/// ```rust
/// use hostel_backend::inbound::http::token_config::fingerprint::secret_fingerprint;
///
/// let fp = secret_fingerprint(b"correct horse battery staple");
///
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn secret_fingerprint(secret: &[u8]) -> String {
    let digest = Sha256::digest(secret);
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fingerprint_is_deterministic() {
        assert_eq!(
            secret_fingerprint(&[b'a'; 32]),
            secret_fingerprint(&[b'a'; 32])
        );
    }

    #[rstest]
    fn fingerprint_matches_known_digest() {
        // sha256("abc") = ba7816bf8f01cfea...
        assert_eq!(secret_fingerprint(b"abc"), "ba7816bf8f01cfea");
    }

    #[rstest]
    fn different_secrets_produce_different_fingerprints() {
        assert_ne!(
            secret_fingerprint(&[b'a'; 32]),
            secret_fingerprint(&[b'b'; 32])
        );
    }
}
