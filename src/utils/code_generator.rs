//! Short code derivation and validation.
//!
//! A candidate code is the tail of the SHA-256 hex digest of the long URL
//! followed by a salt. The first candidate for a URL uses an empty salt and is
//! therefore reproducible; later candidates use random alphanumeric salts.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

/// Length of every short code.
pub const CODE_LENGTH: usize = 5;

/// Length of the random salt drawn on collision.
pub const SALT_LENGTH: usize = 5;

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{5}$").expect("code pattern is valid"));

/// Derives the candidate code for `long_url` under `salt`.
///
/// Takes the last [`CODE_LENGTH`] characters of the lowercase hex SHA-256
/// digest of `long_url ++ salt`.
///
/// # Examples
///
/// ```ignore
/// let code = candidate_code("https://example.com/a", "");
/// assert_eq!(code, candidate_code("https://example.com/a", ""));
/// assert_eq!(code.len(), 5);
/// ```
pub fn candidate_code(long_url: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(long_url.as_bytes());
    hasher.update(salt.as_bytes());
    let digest = hex::encode(hasher.finalize());

    digest[digest.len() - CODE_LENGTH..].to_string()
}

/// Draws a fresh salt uniformly from the 62-symbol alphanumeric alphabet.
pub fn random_salt() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LENGTH)
        .map(char::from)
        .collect()
}

/// Returns true if `code` is exactly five ASCII letters or digits.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Validates a short code before it reaches the store.
///
/// # Errors
///
/// Returns [`AppError::InvalidCode`] unless the code is exactly
/// [`CODE_LENGTH`] ASCII alphanumeric characters.
pub fn validate_code(code: &str) -> Result<(), AppError> {
    if !is_valid_code(code) {
        return Err(AppError::invalid_code(
            "Short code must be exactly 5 ASCII letters or digits",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_candidate_code_is_deterministic() {
        let first = candidate_code("https://example.com/a", "");
        let second = candidate_code("https://example.com/a", "");
        assert_eq!(first, second);
    }

    #[test]
    fn test_candidate_code_matches_digest_tail() {
        let digest = hex::encode(Sha256::digest(b"https://example.com/aSALT1"));
        let code = candidate_code("https://example.com/a", "SALT1");
        assert_eq!(code, &digest[digest.len() - 5..]);
    }

    #[test]
    fn test_candidate_code_has_correct_length() {
        assert_eq!(candidate_code("https://example.com", "").len(), CODE_LENGTH);
    }

    #[test]
    fn test_candidate_code_is_valid() {
        for i in 0..200 {
            let code = candidate_code(&format!("https://example.com/{i}"), "");
            assert!(is_valid_code(&code), "generated invalid code {code}");
        }
    }

    #[test]
    fn test_salt_changes_candidate() {
        let plain = candidate_code("https://example.com/a", "");
        let salted: HashSet<String> = ["aaaaa", "bbbbb", "ccccc", "ddddd"]
            .iter()
            .map(|salt| candidate_code("https://example.com/a", salt))
            .collect();

        assert!(salted.iter().any(|code| code != &plain));
    }

    #[test]
    fn test_random_salt_shape() {
        let salt = random_salt();
        assert_eq!(salt.len(), SALT_LENGTH);
        assert!(salt.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_salt_varies() {
        let salts: HashSet<String> = (0..100).map(|_| random_salt()).collect();
        assert!(salts.len() > 90);
    }

    #[test]
    fn test_validate_accepts_mixed_case_and_digits() {
        assert!(validate_code("aB3dE").is_ok());
        assert!(validate_code("00000").is_ok());
        assert!(validate_code("ZZZZZ").is_ok());
    }

    #[test]
    fn test_validate_too_short() {
        let err = validate_code("abcd").unwrap_err();
        assert!(matches!(err, AppError::InvalidCode { .. }));
    }

    #[test]
    fn test_validate_too_long() {
        assert!(validate_code("abcdef").is_err());
    }

    #[test]
    fn test_validate_special_characters() {
        assert!(validate_code("ab-de").is_err());
        assert!(validate_code("ab_de").is_err());
        assert!(validate_code("ab de").is_err());
    }

    #[test]
    fn test_validate_rejects_non_ascii() {
        assert!(validate_code("abcdé").is_err());
        assert!(validate_code("абвгд").is_err());
    }

    #[test]
    fn test_validate_rejects_trailing_newline() {
        assert!(validate_code("abcde\n").is_err());
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(validate_code("").is_err());
    }
}
