//! Argon2 password hashing and verification.

use argon2::Argon2;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::password_hash::SaltString;

/// Password hasher holding a single per-process salt.
///
/// The salt is generated once at startup and injected here, so hashing is
/// deterministic within a process lifetime. Verification does not need it:
/// the PHC digest carries its own salt.
pub struct Hasher {
    salt: SaltString,
}

impl Hasher {
    pub fn new(salt: SaltString) -> Self {
        Self { salt }
    }
    /// Fresh random salt for this process lifetime.
    pub fn generate() -> Self {
        use rand::Rng;
        let ref mut bytes = [0u8; 16];
        rand::rng().fill(bytes);
        Self::new(SaltString::encode_b64(bytes).expect("salt"))
    }
    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        Argon2::default()
            .hash_password(password.as_bytes(), &self.salt)
            .map(|h| h.to_string())
    }
}

/// Constant-time verification against a PHC-format digest.
/// A malformed digest verifies as false rather than erroring.
pub fn verify(password: &str, hashword: &str) -> bool {
    PasswordHash::new(hashword)
        .ok()
        .as_ref()
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), hash)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies() {
        let hasher = Hasher::generate();
        let digest = hasher.hash("hunter22").unwrap();
        assert!(verify("hunter22", &digest));
    }

    #[test]
    fn wrong_password_fails() {
        let hasher = Hasher::generate();
        let digest = hasher.hash("hunter22").unwrap();
        assert!(!verify("hunter23", &digest));
    }

    #[test]
    fn malformed_digest_fails_quietly() {
        assert!(!verify("hunter22", "not-a-phc-string"));
        assert!(!verify("hunter22", ""));
    }

    #[test]
    fn digest_verifies_across_instances() {
        // digest embeds its salt, so any process can verify it
        let digest = Hasher::generate().hash("hunter22").unwrap();
        let _unrelated = Hasher::generate();
        assert!(verify("hunter22", &digest));
    }
}
