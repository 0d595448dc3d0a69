//! Cryptographic utilities for API key generation and hashing.

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Prefix for all Bookline API keys.
pub const API_KEY_PREFIX: &str = "bl_";

/// Length of the random portion of a generated API key.
const API_KEY_RANDOM_LEN: usize = 32;

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates a new API key of the form `bl_<32 alphanumeric chars>`.
pub fn generate_api_key() -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(API_KEY_RANDOM_LEN)
        .map(char::from)
        .collect();
    format!("{}{}", API_KEY_PREFIX, random)
}

/// Extracts the prefix from an API key (first 8 characters after "bl_").
///
/// The prefix is stored alongside the key hash so keys can be identified
/// in logs and admin listings without exposing the full secret.
pub fn extract_key_prefix(key: &str) -> Option<&str> {
    if key.starts_with(API_KEY_PREFIX) && key.len() >= 11 {
        Some(&key[3..11])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        let hash = sha256_hex("test");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_deterministic() {
        let hash1 = sha256_hex("same_input");
        let hash2 = sha256_hex("same_input");
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_sha256_hex_different_inputs() {
        assert_ne!(sha256_hex("input1"), sha256_hex("input2"));
    }

    #[test]
    fn test_generate_api_key_format() {
        let key = generate_api_key();
        assert!(key.starts_with("bl_"));
        assert_eq!(key.len(), 3 + 32);
        assert!(key[3..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_api_key_unique() {
        assert_ne!(generate_api_key(), generate_api_key());
    }

    #[test]
    fn test_extract_key_prefix() {
        assert_eq!(extract_key_prefix("bl_abcdefgh12345"), Some("abcdefgh"));
        assert_eq!(extract_key_prefix("bl_short"), None);
        assert_eq!(extract_key_prefix("invalid_key"), None);
    }

    #[test]
    fn test_extract_key_prefix_exact_length() {
        // bl_ (3) + 8 characters = 11 minimum
        assert_eq!(extract_key_prefix("bl_12345678"), Some("12345678"));
    }

    #[test]
    fn test_generated_key_prefix_roundtrip() {
        let key = generate_api_key();
        let prefix = extract_key_prefix(&key).unwrap();
        assert_eq!(prefix, &key[3..11]);
    }
}
