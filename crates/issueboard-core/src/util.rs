//! ID generation and hashing utilities.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

// ============================================================================
// ID Generation
// ============================================================================

/// Prefix for store-assigned issue IDs.
pub const ISSUE_ID_PREFIX: &str = "iss";

/// Prefix for provider-assigned user IDs.
pub const USER_ID_PREFIX: &str = "usr";

/// Generate a unique ID with the given prefix.
///
/// The hash is derived from `seed` and the creation time, base36 encoded,
/// and grows with `existing_count` to keep collisions unlikely. The `exists`
/// closure checks for collisions.
pub fn generate_id<F>(
    prefix: &str,
    seed: &str,
    created_at: DateTime<Utc>,
    existing_count: usize,
    exists: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    let mut length = optimal_hash_length(existing_count);
    let mut nonce = 0u32;

    loop {
        let input = format!(
            "{}|{}|{}",
            seed,
            created_at.timestamp_nanos_opt().unwrap_or(0),
            nonce
        );
        let id = format!("{prefix}-{}", hash_base36(&input, length));
        if !exists(&id) {
            return id;
        }

        nonce += 1;
        if nonce % 10 == 0 && length < 12 {
            length += 1;
        }
    }
}

/// Smallest hash length keeping the birthday collision probability under 25%.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn optimal_hash_length(count: usize) -> usize {
    let n = count as f64;
    for len in 3..=8_i32 {
        let space = 36_f64.powi(len);
        let prob = 1.0 - (-n * n / (2.0 * space)).exp();
        if prob < 0.25 {
            return len as usize;
        }
    }
    8
}

fn hash_base36(input: &str, length: usize) -> String {
    let digest = Sha256::digest(input.as_bytes());

    let mut num = 0u64;
    for &byte in digest.iter().take(8) {
        num = (num << 8) | u64::from(byte);
    }

    let encoded = base36_encode(num);
    let padded = format!("{encoded:0>length$}");
    padded.chars().take(length).collect()
}

fn base36_encode(mut num: u64) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if num == 0 {
        return "0".to_string();
    }
    let mut chars = Vec::new();
    while num > 0 {
        chars.push(ALPHABET[(num % 36) as usize] as char);
        num /= 36;
    }
    chars.iter().rev().collect()
}

// ============================================================================
// Password Hashing
// ============================================================================

/// Salted SHA-256 password digest, hex encoded.
#[must_use]
pub fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    to_hex(&hasher.finalize())
}

fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}
