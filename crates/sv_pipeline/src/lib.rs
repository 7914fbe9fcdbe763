//! sv_pipeline: deterministic pipeline surface (load → resolve → simulate → aggregate).
//! Delegates JSON/hashing to `sv_io` and the dynamics to `sv_algo`; this crate
//! decides what runs in what order and how failures are bucketed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sv_algo::{DynamicsLog, SimulationResult, ROUND_CAP};
use sv_core::{CoreError, ElectoralRule, PreferenceProfile, ProfileError};
use sv_io::records::GameRecord;
use sv_io::IoError;

pub mod aggregate;
pub mod batch;
pub mod generate;

pub use aggregate::{summarize, BatchSummary, RuleSummary};
pub use batch::{run_batch, run_games, BatchEntry, BatchFailure, BatchOutcome};
pub use generate::{generate_games, write_games, GenerateConfig, GeneratedGame};

/// Single error surface for the pipeline orchestration.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Io(#[from] IoError),

    /// `electoral_rule` is neither "Plurality" nor "Borda".
    #[error("unsupported electoral rule: {0:?}")]
    UnsupportedRule(String),

    /// The preference profile is not n permutations of 1..=m.
    #[error("invalid game: {0}")]
    Validation(#[from] ProfileError),

    /// Bad generator or run configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<CoreError> for PipelineError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::UnsupportedRule(r) => PipelineError::UnsupportedRule(r),
            other => PipelineError::Config(other.to_string()),
        }
    }
}

/// Knobs for a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub round_cap: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { round_cap: ROUND_CAP }
    }
}

/// A record that passed both checks: known rule, valid profile.
#[derive(Clone, Debug)]
pub struct ResolvedGame {
    pub rule: ElectoralRule,
    pub profile: PreferenceProfile,
}

/// Output of one simulated record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRun {
    pub rule: ElectoralRule,
    pub result: SimulationResult,
    pub log: DynamicsLog,
}

/// Check the rule first, then the profile; nothing is simulated here.
pub fn resolve(record: &GameRecord) -> Result<ResolvedGame, PipelineError> {
    let rule: ElectoralRule = record.electoral_rule.parse()?;
    let profile = record.to_profile()?;
    Ok(ResolvedGame { rule, profile })
}

/// Resolve and simulate one record.
pub fn run_record(record: &GameRecord, cfg: &RunConfig) -> Result<GameRun, PipelineError> {
    if cfg.round_cap == 0 {
        return Err(PipelineError::Config("round cap must be at least 1".into()));
    }
    let game = resolve(record)?;
    let (result, log) = sv_algo::simulate(game.rule, &game.profile, cfg.round_cap);
    if !result.converged {
        tracing::info!(rule = %game.rule, rounds = result.rounds_used, "dynamics hit the round cap");
    }
    Ok(GameRun { rule: game.rule, result, log })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rule: &str, rows: Vec<Vec<u32>>, m: u64) -> GameRecord {
        GameRecord {
            voters: rows.len() as u64,
            candidates: m,
            electoral_rule: rule.into(),
            voting_preferences: rows,
        }
    }

    #[test]
    fn unsupported_rule_is_reported_before_profile_checks() {
        // Profile is also broken, but the rule is checked first.
        let rec = record("Approval", vec![vec![1, 1]], 2);
        match run_record(&rec, &RunConfig::default()) {
            Err(PipelineError::UnsupportedRule(r)) => assert_eq!(r, "Approval"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn invalid_profile_is_a_validation_error() {
        let rec = record("Borda", vec![vec![1, 1]], 2);
        assert!(matches!(
            run_record(&rec, &RunConfig::default()),
            Err(PipelineError::Validation(ProfileError::DuplicateCandidate { voter: 0, candidate: 1 }))
        ));
    }

    #[test]
    fn zero_round_cap_is_rejected() {
        let rec = record("Plurality", vec![vec![1, 2]], 2);
        assert!(matches!(
            run_record(&rec, &RunConfig { round_cap: 0 }),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn runs_plurality_scenario() {
        let rec = record("Plurality", vec![vec![1, 2], vec![1, 2], vec![2, 1]], 2);
        let run = run_record(&rec, &RunConfig::default()).unwrap();
        assert_eq!(run.rule, ElectoralRule::Plurality);
        assert_eq!(run.result.rounds_used, 2);
        assert_eq!(run.result.final_score, 3);
        assert_eq!(run.log.moves.len(), 1);
    }
}
