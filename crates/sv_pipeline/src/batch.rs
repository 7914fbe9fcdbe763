//! crates/sv_pipeline/src/batch.rs
//! BATCH stage: simulate every game in a directory, in natural file-name order.
//! A bad game is recorded as a failure and the batch carries on; only an
//! unreadable directory aborts the whole batch.

use std::path::Path;

use serde::{Deserialize, Serialize};

use sv_algo::SimulationResult;
use sv_core::ElectoralRule;
use sv_io::{hasher, loader, records::GameRecord};

use crate::{run_record, PipelineError, RunConfig};

/// One simulated game as written to `results.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    /// File name of the game record.
    pub game: String,
    pub electoral_rule: ElectoralRule,
    /// SHA-256 of the record's canonical JSON.
    pub game_sha256: String,
    pub result: SimulationResult,
}

/// A game that could not be simulated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub game: String,
    pub error: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub entries: Vec<BatchEntry>,
    pub failures: Vec<BatchFailure>,
}

/// Load and simulate every `*.json` game in `dir`.
pub fn run_batch(dir: &Path, cfg: &RunConfig) -> Result<BatchOutcome, PipelineError> {
    let files = loader::list_games(dir)?;
    let mut out = BatchOutcome::default();

    for path in files {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        match loader::load_game(&path) {
            Ok(record) => push_game(&mut out, name, &record, cfg),
            Err(e) => {
                tracing::warn!(game = %name, error = %e, "skipping unreadable game");
                out.failures.push(BatchFailure { game: name, error: e.to_string() });
            }
        }
    }

    tracing::info!(
        simulated = out.entries.len(),
        failed = out.failures.len(),
        dir = %dir.display(),
        "batch finished"
    );
    Ok(out)
}

/// Simulate already-loaded records (name, record) in the given order.
pub fn run_games<I>(games: I, cfg: &RunConfig) -> BatchOutcome
where
    I: IntoIterator<Item = (String, GameRecord)>,
{
    let mut out = BatchOutcome::default();
    for (name, record) in games {
        push_game(&mut out, name, &record, cfg);
    }
    out
}

fn push_game(out: &mut BatchOutcome, name: String, record: &GameRecord, cfg: &RunConfig) {
    let outcome = hasher::sha256_canonical(record)
        .map_err(PipelineError::from)
        .and_then(|digest| run_record(record, cfg).map(|run| (digest, run)));

    match outcome {
        Ok((game_sha256, run)) => {
            tracing::info!(
                game = %name,
                rule = %run.rule,
                rounds = run.result.rounds_used,
                initial_winner = %run.result.initial_winner,
                final_winner = %run.result.final_winner,
                "simulated game"
            );
            out.entries.push(BatchEntry {
                game: name,
                electoral_rule: run.rule,
                game_sha256,
                result: run.result,
            });
        }
        Err(e) => {
            tracing::warn!(game = %name, error = %e, "skipping invalid game");
            out.failures.push(BatchFailure { game: name, error: e.to_string() });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_do_not_stop_the_batch() {
        let good = GameRecord::new(ElectoralRule::Plurality, 2, vec![vec![1, 2], vec![1, 2], vec![2, 1]]);
        let mut bad = good.clone();
        bad.electoral_rule = "Condorcet".into();

        let out = run_games(
            vec![("a.json".to_string(), bad), ("b.json".to_string(), good)],
            &RunConfig::default(),
        );
        assert_eq!(out.entries.len(), 1);
        assert_eq!(out.entries[0].game, "b.json");
        assert_eq!(out.entries[0].result.rounds_used, 2);
        assert_eq!(out.entries[0].game_sha256.len(), 64);
        assert_eq!(out.failures.len(), 1);
        assert!(out.failures[0].error.contains("Condorcet"));
    }

    #[test]
    fn same_record_same_digest() {
        let g = GameRecord::new(ElectoralRule::Borda, 2, vec![vec![1, 2], vec![2, 1]]);
        let out = run_games(
            vec![("x.json".to_string(), g.clone()), ("y.json".to_string(), g)],
            &RunConfig::default(),
        );
        assert_eq!(out.entries[0].game_sha256, out.entries[1].game_sha256);
        assert_eq!(out.entries[0].result, out.entries[1].result);
    }
}
