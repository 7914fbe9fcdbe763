// crates/sv_cli/src/main.rs
//
// Wires up: exit codes, typed error mapping, CLI parsing, logging, and the
// four subcommands (run, batch, generate, validate).

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
    pub const RENDER: i32 = 5;
}

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Serialize;

use args::{parse_and_validate as parse_cli, Args, Command};
use sv_algo::{Move, SimulationResult};
use sv_core::ElectoralRule;
use sv_io::{canonical_json, loader, IoError};
use sv_pipeline::{GenerateConfig, PipelineError, RunConfig};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// JSON shape, unsupported rule, invalid profile, bad configuration
    Validation(String),
    /// Read/write/path/limit errors
    Io(String),
    /// Report build or output
    Render(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("sv: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };
    init_logging(&args);

    let res = match &args.command {
        Command::Run { game, round_cap, trace, out } => {
            cmd_run(game, *round_cap, *trace, out.as_deref())
        }
        Command::Batch { dir, out, round_cap, render } => {
            cmd_batch(&args, dir, out, *round_cap, render)
        }
        Command::Generate { out, sizes, games_per_cell, rules, seed } => {
            let cfg = GenerateConfig {
                sizes: sizes.clone(),
                games_per_cell: *games_per_cell,
                rules: if rules.is_empty() { ElectoralRule::ALL.to_vec() } else { rules.clone() },
                seed: *seed,
            };
            cmd_generate(&args, &cfg, out)
        }
        Command::Validate { paths } => cmd_validate(&args, paths),
    };

    let rc = match res {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("sv: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn init_logging(args: &Args) {
    let default = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("SV_LOG", default))
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();
}

/// Map our typed errors to the exit-code table.
fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Render(_) => RENDER,
    }
}

/// Translate sv_io::IoError into MainError buckets.
fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        IoError::Hash(m) => MainError::Validation(format!("hash: {m}")),
        IoError::Read(m) => MainError::Io(format!("read: {m}")),
        IoError::Write(m) => MainError::Io(format!("write: {m}")),
        IoError::Path(m) => MainError::Io(format!("path: {m}")),
        IoError::Limit(m) => MainError::Io(format!("limit: {m}")),
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Io(io) => map_io_err(io),
        other @ (PipelineError::UnsupportedRule(_)
        | PipelineError::Validation(_)
        | PipelineError::Config(_)) => MainError::Validation(other.to_string()),
    }
}

// ------------------------------- run -------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunOutput<'a> {
    electoral_rule: ElectoralRule,
    result: &'a SimulationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<&'a [Move]>,
}

fn cmd_run(game: &Path, round_cap: u32, trace: bool, out: Option<&Path>) -> Result<(), MainError> {
    let record = loader::load_game(game).map_err(map_io_err)?;
    let run = sv_pipeline::run_record(&record, &RunConfig { round_cap }).map_err(map_pipeline_err)?;

    let output = RunOutput {
        electoral_rule: run.rule,
        result: &run.result,
        moves: trace.then_some(run.log.moves.as_slice()),
    };
    let text = serde_json::to_string_pretty(&output).map_err(|e| MainError::Io(e.to_string()))?;
    println!("{text}");

    if let Some(path) = out {
        canonical_json::write_canonical_file(&output, path).map_err(map_io_err)?;
    }
    Ok(())
}

// ------------------------------ batch ------------------------------

fn cmd_batch(
    args: &Args,
    dir: &Path,
    out: &Path,
    round_cap: u32,
    render: &[String],
) -> Result<(), MainError> {
    let outcome = sv_pipeline::run_batch(dir, &RunConfig { round_cap }).map_err(map_pipeline_err)?;
    let summary = sv_pipeline::summarize(&outcome);

    canonical_json::write_canonical_file(&outcome, &out.join("results.json")).map_err(map_io_err)?;
    canonical_json::write_canonical_file(&summary, &out.join("summary.json")).map_err(map_io_err)?;

    if !render.is_empty() {
        let model = sv_report::build_model(&summary, &outcome, &dir.display().to_string(), round_cap);
        for kind in render {
            write_report(kind, &model, out)?;
        }
    }

    if !args.quiet {
        eprintln!(
            "batch: {} simulated, {} failed → {}",
            outcome.entries.len(),
            outcome.failures.len(),
            out.display()
        );
    }
    Ok(())
}

fn write_report(kind: &str, model: &sv_report::ReportModel, out: &Path) -> Result<(), MainError> {
    let (text, name): (Result<String, sv_report::ReportError>, &str) = match kind {
        #[cfg(feature = "report-json")]
        "json" => (sv_report::render_json(model), "report.json"),
        #[cfg(feature = "report-html")]
        "html" => (sv_report::render_html(model), "report.html"),
        other => return Err(MainError::Render(format!("renderer not available: {other}"))),
    };
    let text = text.map_err(|e| MainError::Render(e.to_string()))?;
    let path: PathBuf = out.join(name);
    fs::create_dir_all(out).map_err(|e| MainError::Io(format!("{}: {e}", out.display())))?;
    fs::write(&path, text).map_err(|e| MainError::Io(format!("{}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), "wrote report");
    Ok(())
}

// ----------------------------- generate ----------------------------

fn cmd_generate(args: &Args, cfg: &GenerateConfig, out: &Path) -> Result<(), MainError> {
    let n = sv_pipeline::write_games(cfg, out).map_err(map_pipeline_err)?;
    if !args.quiet {
        eprintln!("generate: {n} games → {}", out.display());
    }
    Ok(())
}

// ----------------------------- validate ----------------------------

/// Load + resolve every game under `paths` (files or directories); no simulation.
/// All failures are reported; the exit code follows the first one.
fn cmd_validate(args: &Args, paths: &[PathBuf]) -> Result<(), MainError> {
    let mut files = Vec::new();
    let mut first_err: Option<MainError> = None;

    for p in paths {
        if p.is_dir() {
            match loader::list_games(p) {
                Ok(v) => files.extend(v),
                Err(e) => report(&mut first_err, p, map_io_err(e)),
            }
        } else {
            files.push(p.clone());
        }
    }

    let mut ok = 0usize;
    for f in &files {
        let checked = loader::load_game(f)
            .map_err(map_io_err)
            .and_then(|rec| sv_pipeline::resolve(&rec).map_err(map_pipeline_err));
        match checked {
            Ok(_) => ok += 1,
            Err(e) => report(&mut first_err, f, e),
        }
    }

    match first_err {
        Some(e) => Err(e),
        None => {
            if !args.quiet {
                eprintln!("validate: {ok} games OK");
            }
            Ok(())
        }
    }
}

fn report(first: &mut Option<MainError>, path: &Path, e: MainError) {
    eprintln!("{}: {e}", path.display());
    if first.is_none() {
        *first = Some(e);
    }
}
