//! Canonical JSON utilities (sv_io)
//! - Objects: keys sorted lexicographically (UTF-8 codepoint order)
//! - Arrays: order preserved (caller is responsible for stable ordering)
//! - Output: compact (no extra spaces, no trailing newline)
//! - Atomic write: temp file in same dir + fsync(temp) + rename; fsync(dir) on Unix
//! - Fallback: if rename fails (e.g., cross-device), write directly to target,
//!   fsync(target), then remove temp.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::{IoError, IoResult};

/// Convert a serde_json `Value` to canonical JSON bytes.
pub fn canonical_json_bytes(v: &Value) -> Vec<u8> {
    let mut out = Vec::with_capacity(1024);
    write_canonical_value(v, &mut out);
    out
}

/// Serialize any value to canonical JSON bytes.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> IoResult<Vec<u8>> {
    let v = serde_json::to_value(value)?;
    Ok(canonical_json_bytes(&v))
}

/// Write canonical JSON for `value` to `path` atomically, creating parent
/// directories as needed.
pub fn write_canonical_file<T: Serialize>(value: &T, path: &Path) -> IoResult<()> {
    let bytes = to_canonical_bytes(value)?;
    write_atomic(path, &bytes).map_err(|e| IoError::Write(format!("{}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote canonical json");
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let tmp = make_unique_tmp_path(path);
    let mut tf = OpenOptions::new().write(true).create_new(true).open(&tmp)?;
    tf.write_all(bytes)?;
    tf.sync_all()?;
    drop(tf);

    match fs::rename(&tmp, path) {
        Ok(()) => {
            let _ = fsync_dir(&parent);
            Ok(())
        }
        Err(_) => {
            let res: io::Result<()> = (|| {
                let mut f = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
                f.write_all(bytes)?;
                f.sync_all()
            })();
            let _ = fs::remove_file(&tmp);
            res?;
            let _ = fsync_dir(&parent);
            Ok(())
        }
    }
}

fn write_canonical_value(v: &Value, out: &mut Vec<u8>) {
    match v {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::String(s) => write_json_string(s, out),
        Value::Array(arr) => {
            out.push(b'[');
            for (i, elem) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical_value(elem, out);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            out.push(b'{');
            let mut keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
            keys.sort_unstable();
            for (i, k) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_json_string(k, out);
                out.push(b':');
                write_canonical_value(&map[k], out);
            }
            out.push(b'}');
        }
    }
}

fn write_json_string(s: &str, out: &mut Vec<u8>) {
    // Writing a string into a Vec cannot fail; serde_json handles escaping.
    let _ = serde_json::to_writer(&mut *out, s);
}

/// Unique temp path next to `target`: "<filename>.<pid>.<counter>.tmp"
fn make_unique_tmp_path(target: &Path) -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let pid = std::process::id();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let fname = target.file_name().and_then(|s| s.to_str()).unwrap_or("file");
    target.with_file_name(format!("{fname}.{pid}.{n}.tmp"))
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    OpenOptions::new().read(true).open(dir)?.sync_all()
}

#[cfg(not(unix))]
#[inline]
fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
