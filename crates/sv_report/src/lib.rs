//! sv_report: pure offline report model + renderers (JSON/HTML).
//!
//! Determinism rules:
//! - No I/O here. Callers hand in the batch summary already in memory.
//! - Means and percentages are one-decimal strings built from integer tenths.
//! - Stable section order and field names.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sv_pipeline::aggregate::tenths;
use sv_pipeline::{BatchEntry, BatchOutcome, BatchSummary, RuleSummary};

#[cfg(feature = "render_html")]
mod render_html;
#[cfg(feature = "render_html")]
pub use render_html::render_html;

// ===== Errors =====

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("template error: {0}")]
    Template(&'static str),
    #[error("serialization error: {0}")]
    Serialize(String),
}

// ===== Model =====

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportModel {
    pub title: String,
    /// Directory (or other label) the games were read from.
    pub source: String,
    pub round_cap: u32,
    pub totals: Totals,
    pub rules: Vec<RuleSection>,
    /// One row per simulated game, in batch order.
    pub games: Vec<GameRow>,
    pub failures: Vec<FailureRow>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub games: u64,
    pub failures: u64,
}

/// One rule's row; every derived figure is preformatted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSection {
    pub rule: String,
    pub games: u64,
    pub mean_rounds: String,
    pub max_rounds: u32,
    pub non_converged: u64,
    pub different_winners: u64,
    pub different_winners_pct: String,
    pub mean_score_shift: String,
    pub score_shift_pct: String,
}

/// Truthful vs. equilibrium standing of a single game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRow {
    pub game: String,
    pub rule: String,
    pub rounds: u32,
    pub converged: bool,
    pub initial_winner: u32,
    pub initial_score: u64,
    pub final_winner: u32,
    pub final_score: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRow {
    pub game: String,
    pub error: String,
}

const NA: &str = "n/a";

/// Build the report model from a batch outcome and its summary.
pub fn build_model(
    summary: &BatchSummary,
    outcome: &BatchOutcome,
    source: &str,
    round_cap: u32,
) -> ReportModel {
    ReportModel {
        title: "Strategic voting: best-response dynamics".to_string(),
        source: source.to_string(),
        round_cap,
        totals: Totals {
            games: summary.total_games(),
            failures: summary.failures,
        },
        rules: summary.rules.iter().map(rule_section).collect(),
        games: outcome.entries.iter().map(game_row).collect(),
        failures: outcome
            .failures
            .iter()
            .map(|f| FailureRow { game: f.game.clone(), error: f.error.clone() })
            .collect(),
    }
}

fn rule_section(r: &RuleSummary) -> RuleSection {
    let games = i128::from(r.games);
    RuleSection {
        rule: r.rule.as_str().to_string(),
        games: r.games,
        mean_rounds: fmt_opt(r.mean_rounds_tenths(), ""),
        max_rounds: r.max_rounds,
        non_converged: r.non_converged,
        different_winners: r.different_winners,
        different_winners_pct: fmt_opt(tenths(i128::from(r.different_winners) * 100, games), "%"),
        mean_score_shift: fmt_opt(r.mean_score_shift_tenths(), ""),
        score_shift_pct: fmt_opt(r.score_shift_pct_tenths(), "%"),
    }
}

fn game_row(e: &BatchEntry) -> GameRow {
    let r = &e.result;
    GameRow {
        game: e.game.clone(),
        rule: e.electoral_rule.as_str().to_string(),
        rounds: r.rounds_used,
        converged: r.converged,
        initial_winner: r.initial_winner.get(),
        initial_score: r.initial_score,
        final_winner: r.final_winner.get(),
        final_score: r.final_score,
    }
}

fn fmt_opt(t: Option<i128>, suffix: &str) -> String {
    match t {
        Some(v) => format!("{}{suffix}", fmt_tenths(v)),
        None => NA.to_string(),
    }
}

/// Integer tenths → "12.3" / "-0.5". No float arithmetic.
pub fn fmt_tenths(t: i128) -> String {
    let sign = if t < 0 { "-" } else { "" };
    let abs = t.unsigned_abs();
    format!("{sign}{}.{}", abs / 10, abs % 10)
}

// ===== Renderers =====

/// Serialize the model as pretty JSON (field order follows struct layout).
#[cfg(feature = "render_json")]
pub fn render_json(model: &ReportModel) -> Result<String, ReportError> {
    serde_json::to_string_pretty(model).map_err(|e| ReportError::Serialize(e.to_string()))
}
