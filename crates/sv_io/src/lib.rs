//! crates/sv_io/src/lib.rs
//! Single-source-of-truth I/O crate for the simulator.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Game records in, result records out; nothing here runs the engine.
//! - Offline only: paths that look like URLs are rejected before any read.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for sv_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Failed to read a file or list a directory.
    #[error("read error: {0}")]
    Read(String),

    /// Failed to create, write or rename an output file.
    #[error("write error: {0}")]
    Write(String),

    /// Path is unusable (URL-like, missing parent, not a directory, ...).
    #[error("path error: {0}")]
    Path(String),

    /// Input exceeds a hard size limit.
    #[error("limit exceeded: {0}")]
    Limit(String),

    /// JSON (de)serialization errors with a JSON Pointer hint.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Hashing-related errors.
    #[error("hash error: {0}")]
    Hash(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps no pointer; default to root. Callers may enrich.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;
pub mod records;

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}
