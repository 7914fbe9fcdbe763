//! crates/sv_io/src/hasher.rs
//!
//! SHA-256 digests for game records, so batch results can be tied back to the
//! exact input they were computed from.
//!
//! - Use `sha256_canonical(..)` for JSON values/structs (goes through canonical_json):
//!   two files with the same content but different key order or whitespace
//!   share a digest.
//! - Use `sha256_hex(..)` for raw bytes.
//! - Hex digests are lowercase.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::{IoError, IoResult};

/// SHA-256 over raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over canonical JSON bytes of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    let bytes = to_canonical_bytes(value).map_err(|e| IoError::Hash(e.to_string()))?;
    Ok(sha256_hex(&bytes))
}
