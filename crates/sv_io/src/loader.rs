//! Loader: read local game records (single files or whole directories) with
//! size limits and deterministic ordering. No network I/O.

#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::canonical_json::write_canonical_file;
use crate::records::GameRecord;
use crate::{looks_like_url_strict, IoError, IoResult};

/// Hard cap on a single game file. The largest generated games
/// (100 voters x 100 candidates) are well under 100 KiB.
pub const MAX_GAME_BYTES: u64 = 16 * 1024 * 1024;

/// Read and parse one JSON file, refusing URL-like paths and oversized inputs.
pub fn read_json_value_with_limits(path: &Path) -> IoResult<Value> {
    if looks_like_url_strict(&path.to_string_lossy()) {
        return Err(IoError::Path(format!("not a local path: {}", path.display())));
    }
    let f = File::open(path).map_err(|e| IoError::Read(format!("{}: {e}", path.display())))?;
    let len = f
        .metadata()
        .map_err(|e| IoError::Read(format!("{}: {e}", path.display())))?
        .len();
    if len > MAX_GAME_BYTES {
        return Err(IoError::Limit(format!(
            "{} is {len} bytes (max {MAX_GAME_BYTES})",
            path.display()
        )));
    }

    let mut buf = Vec::with_capacity(len as usize);
    f.take(MAX_GAME_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| IoError::Read(format!("{}: {e}", path.display())))?;
    serde_json::from_slice(&buf).map_err(|e| IoError::Json {
        pointer: "/".into(),
        msg: format!("{}: {e}", path.display()),
    })
}

/// Load a single game record.
pub fn load_game(path: &Path) -> IoResult<GameRecord> {
    let v = read_json_value_with_limits(path)?;
    serde_json::from_value(v).map_err(|e| IoError::Json {
        pointer: "/".into(),
        msg: format!("{}: {e}", path.display()),
    })
}

/// Write a game record as canonical JSON.
pub fn write_game(path: &Path, game: &GameRecord) -> IoResult<()> {
    write_canonical_file(game, path)
}

/// All `*.json` files directly inside `dir`, in natural file-name order
/// (`game2.json` before `game10.json`).
pub fn list_games(dir: &Path) -> IoResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IoError::Path(format!("not a directory: {}", dir.display())));
    }
    let rd = fs::read_dir(dir).map_err(|e| IoError::Read(format!("{}: {e}", dir.display())))?;

    let mut out = Vec::new();
    for entry in rd {
        let entry = entry.map_err(|e| IoError::Read(format!("{}: {e}", dir.display())))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    out.sort_by(|a, b| natural_cmp(&file_name(a), &file_name(b)));
    tracing::debug!(dir = %dir.display(), games = out.len(), "listed game files");
    Ok(out)
}

fn file_name(p: &Path) -> String {
    p.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Compare names chunk by chunk, treating digit runs as numbers.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut ai, mut bi) = (a.char_indices().peekable(), b.char_indices().peekable());
    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some((_, ca)), Some((_, cb))) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let na = take_number(&mut ai);
                let nb = take_number(&mut bi);
                match na.cmp(&nb) {
                    Ordering::Equal => {}
                    o => return o,
                }
            }
            (Some((_, ca)), Some((_, cb))) => {
                match ca.cmp(&cb) {
                    Ordering::Equal => {
                        ai.next();
                        bi.next();
                    }
                    o => return o,
                }
            }
        }
    }
}

fn take_number<I: Iterator<Item = (usize, char)>>(it: &mut std::iter::Peekable<I>) -> u128 {
    let mut n: u128 = 0;
    while let Some(&(_, c)) = it.peek() {
        match c.to_digit(10) {
            Some(d) => {
                n = n.saturating_mul(10).saturating_add(u128::from(d));
                it.next();
            }
            None => break,
        }
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_core::ElectoralRule;

    #[test]
    fn natural_order_sorts_numbers_by_value() {
        let mut v = vec!["game10.json", "game2.json", "game1.json", "a.json"];
        v.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(v, vec!["a.json", "game1.json", "game2.json", "game10.json"]);
    }

    #[test]
    fn write_then_list_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let g = GameRecord::new(ElectoralRule::Plurality, 2, vec![vec![1, 2], vec![2, 1]]);
        write_game(&dir.path().join("game10.json"), &g).unwrap();
        write_game(&dir.path().join("game9.json"), &g).unwrap();
        fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

        let files = list_games(dir.path()).unwrap();
        let names: Vec<String> = files.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["game9.json", "game10.json"]);
        assert_eq!(load_game(&files[0]).unwrap(), g);
    }

    #[test]
    fn rejects_urls_and_bad_json() {
        let err = load_game(Path::new("https://example.com/game.json")).unwrap_err();
        assert!(matches!(err, IoError::Path(_)));

        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("broken.json");
        fs::write(&p, "{\"voters\": ").unwrap();
        assert!(matches!(load_game(&p).unwrap_err(), IoError::Json { .. }));

        let missing_field = dir.path().join("partial.json");
        fs::write(&missing_field, r#"{"voters": 1, "candidates": 1}"#).unwrap();
        assert!(matches!(load_game(&missing_field).unwrap_err(), IoError::Json { .. }));
    }

    #[test]
    fn list_requires_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(list_games(&missing).unwrap_err(), IoError::Path(_)));
    }
}
