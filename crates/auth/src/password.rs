//! Credential hashing and verification (argon2, PHC string format).

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to gather entropy: {0}")]
    Entropy(String),

    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// Hash a plaintext password into a PHC-format argon2 string.
pub fn hash(password: &str) -> Result<String, PasswordError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| PasswordError::Entropy(e.to_string()))?;
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Hash(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verify a plaintext password against a stored PHC hash.
///
/// Argon2 verification is constant-time in the password; a malformed stored
/// hash verifies as a plain mismatch so the caller's response shape stays
/// uniform.
pub fn verify(stored_hash: &str, password: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

const TEMP_PASSWORD_LEN: usize = 12;
const TEMP_PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789";

/// Generate a random temporary password for invited users.
///
/// The charset omits easily-confused glyphs (0/O, 1/l/I) since these are
/// relayed to humans out of band.
pub fn generate_temp_password() -> Result<String, PasswordError> {
    let mut bytes = [0u8; TEMP_PASSWORD_LEN];
    getrandom::getrandom(&mut bytes).map_err(|e| PasswordError::Entropy(e.to_string()))?;

    Ok(bytes
        .iter()
        .map(|b| TEMP_PASSWORD_CHARSET[(*b as usize) % TEMP_PASSWORD_CHARSET.len()] as char)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_and_verifies_password() {
        let phc = hash("password").unwrap();
        assert!(phc.starts_with("$argon2"));
        assert!(verify(&phc, "password"));
        assert!(!verify(&phc, "passw0rd"));
    }

    #[test]
    fn distinct_salts_produce_distinct_hashes() {
        let a = hash("password").unwrap();
        let b = hash("password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_is_a_mismatch() {
        assert!(!verify("not-a-phc-string", "password"));
        assert!(!verify("", "password"));
    }

    #[test]
    fn temp_passwords_use_the_expected_charset() {
        let pw = generate_temp_password().unwrap();
        assert_eq!(pw.len(), TEMP_PASSWORD_LEN);
        assert!(pw.bytes().all(|b| TEMP_PASSWORD_CHARSET.contains(&b)));
    }
}
