//! Deterministic content-hash identifiers.
//!
//! Edge, cycle and path identifiers are derived from the entities they
//! describe using SHA-256 and base36 encoding, format `{prefix}-{hash}`
//! (e.g. "edge-k3v09qzt"). Identical input therefore produces identical
//! identifiers across runs, which the analysis determinism property
//! depends on.

use sha2::{Digest, Sha256};

const BASE36_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Number of base36 characters in a hash suffix.
const HASH_LENGTH: usize = 8;

/// Identifier for an edge, derived from its endpoints and kind.
#[must_use]
pub fn edge_id(source: &str, target: &str, kind: &str) -> String {
    content_id("edge", &[source, target, kind])
}

/// Identifier for a bidirectional cycle, derived from the sorted pair.
#[must_use]
pub fn cycle_id(first: &str, second: &str) -> String {
    content_id("cycle", &[first, second])
}

/// Identifier for a critical path, derived from its endpoints.
#[must_use]
pub fn path_id(start: &str, end: &str) -> String {
    content_id("path", &[start, end])
}

/// Build a `{prefix}-{hash}` identifier over the given parts.
fn content_id(prefix: &str, parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update(b"|");
    }
    let hash_bytes = hasher.finalize();
    format!("{}-{}", prefix, encode_base36(&hash_bytes[..8]))
}

/// Encode the first 8 hash bytes as a fixed-length base36 string.
///
/// Wrapping arithmetic is intentional: the input is capped at 8 bytes to
/// fit a u64, and wrapping keeps the output deterministic either way.
fn encode_base36(bytes: &[u8]) -> String {
    let mut num: u64 = 0;
    for &byte in bytes {
        num = num.wrapping_shl(8).wrapping_add(u64::from(byte));
    }

    let mut result = Vec::with_capacity(HASH_LENGTH);
    let mut n = num;

    while result.len() < HASH_LENGTH {
        let remainder = (n % 36) as usize;
        result.push(BASE36_CHARS[remainder]);
        n /= 36;
    }

    result.reverse();

    // BASE36_CHARS is ASCII, so the bytes are always valid UTF-8.
    String::from_utf8(result).unwrap_or_default()
}
