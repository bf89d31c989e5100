//! Credential hashing for account passwords.
//!
//! PBKDF2-SHA256 with a per-account random salt, verified in constant
//! time. Plaintext is never stored or compared directly. Stored format:
//! `pbkdf2-sha256$<iterations>$<salt-b64>$<hash-b64>` (URL-safe base64,
//! no padding).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

pub const PBKDF2_ITERATIONS: u32 = 600_000;
const HASH_LENGTH: usize = 32;
const SALT_LENGTH: usize = 16;
const SCHEME: &str = "pbkdf2-sha256";

fn derive(password: &str, salt: &[u8], iterations: u32) -> [u8; HASH_LENGTH] {
    let mut out = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
    out
}

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    use rand::RngCore;
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    let hash = derive(password, &salt, PBKDF2_ITERATIONS);
    format!(
        "{SCHEME}${PBKDF2_ITERATIONS}${}${}",
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(hash),
    )
}

/// Verify a plaintext password against a stored encoding.
///
/// Returns `false` for malformed encodings rather than erroring — a
/// failed parse and a wrong password are indistinguishable to callers.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let mut parts = encoded.split('$');
    let (Some(scheme), Some(iters), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }
    let Ok(iterations) = iters.parse::<u32>() else {
        return false;
    };
    let Ok(salt) = URL_SAFE_NO_PAD.decode(salt) else {
        return false;
    };
    let Ok(expected) = URL_SAFE_NO_PAD.decode(hash) else {
        return false;
    };
    let actual = derive(password, &salt, iterations);
    actual.ct_eq(expected.as_slice()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests use a cheap iteration count via verify's self-describing
    // format; full-strength hashing is exercised once.

    fn cheap_hash(password: &str) -> String {
        let salt = [7u8; SALT_LENGTH];
        let hash = derive(password, &salt, 1_000);
        format!(
            "{SCHEME}$1000${}${}",
            URL_SAFE_NO_PAD.encode(salt),
            URL_SAFE_NO_PAD.encode(hash),
        )
    }

    #[test]
    fn verify_accepts_correct_password() {
        let encoded = cheap_hash("secret123");
        assert!(verify_password("secret123", &encoded));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let encoded = cheap_hash("secret123");
        assert!(!verify_password("secret124", &encoded));
    }

    #[test]
    fn verify_rejects_malformed_encoding() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "plaintext"));
        assert!(!verify_password("x", "pbkdf2-sha256$notanumber$AA$AA"));
        assert!(!verify_password("x", "md5$1000$AA$AA"));
    }

    #[test]
    fn full_strength_round_trip() {
        let encoded = hash_password("123");
        assert!(encoded.starts_with("pbkdf2-sha256$600000$"));
        assert!(verify_password("123", &encoded));
        assert!(!verify_password("1234", &encoded));
    }

    #[test]
    fn hashes_are_salted() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }
}
