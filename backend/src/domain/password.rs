//! Stored password format and verification.
//!
//! New accounts are stored as Argon2id PHC strings (`$argon2id$v=19$...`).
//! Rows without the `$argon2` prefix are legacy plaintext values; they still
//! verify, but callers are told so they can log and rotate them.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

const PHC_PREFIX: &str = "$argon2";

/// Outcome of comparing a candidate password with a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    /// The candidate matches an Argon2 hash.
    Match,
    /// The candidate matches a legacy plaintext value.
    LegacyMatch,
    /// The candidate does not match.
    Mismatch,
}

/// Hashing failed inside Argon2.
#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(argon2::password_hash::Error);

/// Hash a password with a fresh random salt.
///
/// # Examples
/// ```
/// use gradebook::domain::password::{hash_password, verify_password, PasswordCheck};
///
/// let stored = hash_password("p").expect("hashable");
/// assert!(stored.starts_with("$argon2id$"));
/// assert_eq!(verify_password(&stored, "p"), PasswordCheck::Match);
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordHashError)
}

/// Compare `candidate` with a stored password value.
pub fn verify_password(stored: &str, candidate: &str) -> PasswordCheck {
    if !stored.starts_with(PHC_PREFIX) {
        return if stored == candidate {
            PasswordCheck::LegacyMatch
        } else {
            PasswordCheck::Mismatch
        };
    }
    let Ok(parsed) = PasswordHash::new(stored) else {
        return PasswordCheck::Mismatch;
    };
    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => PasswordCheck::Match,
        Err(_) => PasswordCheck::Mismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hashed_password_verifies() {
        let stored = hash_password("correct horse").expect("hashable");
        assert_eq!(verify_password(&stored, "correct horse"), PasswordCheck::Match);
        assert_eq!(verify_password(&stored, "wrong horse"), PasswordCheck::Mismatch);
    }

    #[rstest]
    fn stored_value_is_a_salted_argon2id_phc_string() {
        let first = hash_password("p").expect("hashable");
        let second = hash_password("p").expect("hashable");

        let parsed = PasswordHash::new(&first).expect("PHC string");
        assert_eq!(parsed.algorithm.as_str(), "argon2id");
        assert!(parsed.salt.is_some());
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("123456", "123456", PasswordCheck::LegacyMatch)]
    #[case("123456", "1234567", PasswordCheck::Mismatch)]
    #[case("$argon2id$garbage", "p", PasswordCheck::Mismatch)]
    #[case("sha256$00$00", "p", PasswordCheck::Mismatch)]
    fn legacy_and_malformed_values(
        #[case] stored: &str,
        #[case] candidate: &str,
        #[case] expected: PasswordCheck,
    ) {
        assert_eq!(verify_password(stored, candidate), expected);
    }
}
