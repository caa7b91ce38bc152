//! SHA-256 hashing over canonical JSON
//!
//! Every value that is hashed or signed goes through the canonical JSON
//! form first, so the digest never depends on the order fields were set in.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Hash arbitrary bytes, hex-encoded
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Compact JSON text of a value with object keys sorted at every level.
///
/// `serde_json::Map` keeps its keys ordered, so writing a `Value` back out
/// is already canonical.
pub fn canonical_string(value: &Value) -> String {
    value.to_string()
}

/// Hash the canonical form of a JSON value
pub fn hash_value(value: &Value) -> String {
    sha256_hex(canonical_string(value).as_bytes())
}
