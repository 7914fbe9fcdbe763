// crates/sv_cli/src/args.rs
//
// Deterministic, offline CLI argument surface.
//
// Rules:
// - No networked paths (reject any scheme:// like http/https/file)
// - Round cap is >= 1 (default 1000)
// - Seed is u64 decimal or 0x-hex up to 16 nybbles
// - Renderers: --render [json|html]*, batch only

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use sv_algo::ROUND_CAP;
use sv_core::ElectoralRule;
use sv_pipeline::generate::{DEFAULT_GAMES_PER_CELL, DEFAULT_SIZES};

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "sv",
    version,
    disable_help_subcommand = true,
    about = "Best-response dynamics for strategic voting (Plurality, Borda)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Raise log verbosity (-v info, -vv debug). `SV_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential stderr output.
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Simulate one game file and print its result as JSON.
    Run {
        game: PathBuf,
        #[arg(long, default_value_t = ROUND_CAP, value_parser = parse_round_cap)]
        round_cap: u32,
        /// Include the ordered list of applied moves.
        #[arg(long)]
        trace: bool,
        /// Also write the output as canonical JSON to this path.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Simulate every *.json game in a directory; write results.json and summary.json.
    Batch {
        dir: PathBuf,
        /// Output directory (default: current directory).
        #[arg(long, default_value = ".")]
        out: PathBuf,
        #[arg(long, default_value_t = ROUND_CAP, value_parser = parse_round_cap)]
        round_cap: u32,
        /// Report renderer(s) to emit. Choose up to 2 (json, html).
        #[arg(long, value_parser = ["json", "html"], num_args = 0..=2)]
        render: Vec<String>,
    },

    /// Write a synthetic grid of games (game1.json, game2.json, ...) into a directory.
    Generate {
        out: PathBuf,
        /// Grid sizes, used for both voters and candidates.
        #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SIZES)]
        sizes: Vec<u32>,
        #[arg(long, default_value_t = DEFAULT_GAMES_PER_CELL)]
        games_per_cell: u32,
        /// Rules to emit per profile (default: all).
        #[arg(long, value_delimiter = ',', value_parser = parse_rule)]
        rules: Vec<ElectoralRule>,
        /// RNG seed. Accepts decimal u64 or 0x-hex (<=16 hex digits).
        #[arg(long, default_value = "0", value_parser = parse_seed)]
        seed: u64,
    },

    /// Load and validate game files or directories without simulating.
    Validate {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

/// Errors surfaced by argument validation.
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local (no scheme): {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Entry point used by main.rs.
pub fn parse_and_validate() -> Result<Args, CliError> {
    let args = Args::parse();
    for p in args.command.paths() {
        ensure_local_path(p)?;
    }
    Ok(args)
}

impl Command {
    /// Every path-like argument, for scheme checks.
    fn paths(&self) -> Vec<&Path> {
        match self {
            Command::Run { game, out, .. } => {
                let mut v = vec![game.as_path()];
                v.extend(out.as_deref());
                v
            }
            Command::Batch { dir, out, .. } => vec![dir.as_path(), out.as_path()],
            Command::Generate { out, .. } => vec![out.as_path()],
            Command::Validate { paths } => paths.iter().map(PathBuf::as_path).collect(),
        }
    }
}

/// Seed parser: decimal u64 or 0x-hex (1..=16 nybbles).
pub fn parse_seed(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty seed".into());
    }
    if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if rest.is_empty() || rest.len() > 16 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("hex seed must be 1..16 hex digits".into());
        }
        u64::from_str_radix(rest, 16).map_err(|_| "hex seed out of range".into())
    } else {
        s.parse::<u64>().map_err(|_| "decimal seed must be a valid u64".into())
    }
}

pub fn parse_round_cap(s: &str) -> Result<u32, String> {
    match s.trim().parse::<u32>() {
        Ok(0) => Err("round cap must be at least 1".into()),
        Ok(n) => Ok(n),
        Err(_) => Err("round cap must be a positive integer".into()),
    }
}

pub fn parse_rule(s: &str) -> Result<ElectoralRule, String> {
    s.trim().parse::<ElectoralRule>().map_err(|e| e.to_string())
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn clap_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn seed_accepts_decimal_and_hex() {
        assert_eq!(parse_seed("42").unwrap(), 42);
        assert_eq!(parse_seed("0x2A").unwrap(), 42);
        assert_eq!(parse_seed("0xffffffffffffffff").unwrap(), u64::MAX);
        assert!(parse_seed("0x").is_err());
        assert!(parse_seed("0x1ffffffffffffffff").is_err());
        assert!(parse_seed("-1").is_err());
    }

    #[test]
    fn round_cap_must_be_positive() {
        assert_eq!(parse_round_cap("7").unwrap(), 7);
        assert!(parse_round_cap("0").is_err());
        assert!(parse_round_cap("x").is_err());
    }

    #[test]
    fn rule_names_are_exact() {
        assert_eq!(parse_rule("Borda").unwrap(), ElectoralRule::Borda);
        assert!(parse_rule("borda").is_err());
    }

    #[test]
    fn generate_defaults() {
        let a = Args::try_parse_from(["sv", "generate", "games"]).unwrap();
        match a.command {
            Command::Generate { sizes, games_per_cell, rules, seed, .. } => {
                assert_eq!(sizes, DEFAULT_SIZES.to_vec());
                assert_eq!(games_per_cell, 30);
                assert!(rules.is_empty());
                assert_eq!(seed, 0);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn schemes_are_rejected() {
        assert!(ensure_local_path(Path::new("https://x/game.json")).is_err());
        assert!(ensure_local_path(Path::new("games/game1.json")).is_ok());
    }
}
