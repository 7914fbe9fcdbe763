//! GENERATE stage: synthetic games over an (n voters × m candidates) grid.
//!
//! For every n in `sizes`, every m in `sizes` and k in `0..games_per_cell`,
//! draw n independent uniform permutations of 1..=m and emit the same profile
//! once per configured rule. Files are numbered sequentially from 1
//! (`game1.json`, `game2.json`, ...). Output depends only on the config.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sv_core::{rng::GameRng, ElectoralRule};
use sv_io::{loader, records::GameRecord};

use crate::PipelineError;

pub const DEFAULT_SIZES: [u32; 5] = [5, 10, 20, 50, 100];
pub const DEFAULT_GAMES_PER_CELL: u32 = 30;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateConfig {
    /// Used for both the voter and the candidate axis.
    pub sizes: Vec<u32>,
    pub games_per_cell: u32,
    pub rules: Vec<ElectoralRule>,
    pub seed: u64,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            games_per_cell: DEFAULT_GAMES_PER_CELL,
            rules: ElectoralRule::ALL.to_vec(),
            seed: 0,
        }
    }
}

impl GenerateConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.sizes.is_empty() {
            return Err(PipelineError::Config("sizes must not be empty".into()));
        }
        if self.sizes.contains(&0) {
            return Err(PipelineError::Config("sizes must be >= 1".into()));
        }
        if self.games_per_cell == 0 {
            return Err(PipelineError::Config("games per cell must be >= 1".into()));
        }
        if self.rules.is_empty() {
            return Err(PipelineError::Config("at least one rule is required".into()));
        }
        Ok(())
    }

    /// Number of records `generate_games` will emit.
    pub fn total_games(&self) -> u64 {
        let cells = (self.sizes.len() as u64).pow(2);
        cells * u64::from(self.games_per_cell) * self.rules.len() as u64
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedGame {
    /// 1-based sequence number.
    pub index: u64,
    pub record: GameRecord,
}

impl GeneratedGame {
    pub fn file_name(&self) -> String {
        format!("game{}.json", self.index)
    }
}

/// Drive the grid, handing each record to `emit` in sequence order.
/// Returns the number of records emitted.
pub fn generate_games<F>(cfg: &GenerateConfig, mut emit: F) -> Result<u64, PipelineError>
where
    F: FnMut(GeneratedGame) -> Result<(), PipelineError>,
{
    cfg.validate()?;
    let mut rng = GameRng::from_seed_u64(cfg.seed);
    let mut index = 0u64;

    for &n in &cfg.sizes {
        for &m in &cfg.sizes {
            for _ in 0..cfg.games_per_cell {
                let prefs: Vec<Vec<u32>> = (0..n).map(|_| rng.permutation(m)).collect();
                for &rule in &cfg.rules {
                    index += 1;
                    emit(GeneratedGame {
                        index,
                        record: GameRecord::new(rule, m, prefs.clone()),
                    })?;
                }
            }
            tracing::debug!(voters = n, candidates = m, "generated grid cell");
        }
    }

    tracing::info!(games = index, seed = cfg.seed, words = %rng.words_consumed(), "generation finished");
    Ok(index)
}

/// Generate into `dir` as canonical JSON files.
pub fn write_games(cfg: &GenerateConfig, dir: &Path) -> Result<u64, PipelineError> {
    generate_games(cfg, |g| {
        loader::write_game(&dir.join(g.file_name()), &g.record)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> GenerateConfig {
        GenerateConfig {
            sizes: vec![2, 3],
            games_per_cell: 2,
            rules: ElectoralRule::ALL.to_vec(),
            seed: 7,
        }
    }

    fn collect(cfg: &GenerateConfig) -> Vec<GeneratedGame> {
        let mut out = Vec::new();
        generate_games(cfg, |g| {
            out.push(g);
            Ok(())
        })
        .unwrap();
        out
    }

    #[test]
    fn grid_shape_and_numbering() {
        let cfg = small();
        let games = collect(&cfg);
        assert_eq!(games.len() as u64, cfg.total_games());
        assert_eq!(games.len(), 2 * 2 * 2 * 2);
        assert_eq!(games[0].file_name(), "game1.json");
        assert_eq!(games.last().unwrap().index, 16);

        // Each profile is emitted once per rule, back to back.
        assert_eq!(games[0].record.electoral_rule, "Plurality");
        assert_eq!(games[1].record.electoral_rule, "Borda");
        assert_eq!(games[0].record.voting_preferences, games[1].record.voting_preferences);

        // First cell is n=2, m=2; last is n=3, m=3.
        assert_eq!((games[0].record.voters, games[0].record.candidates), (2, 2));
        let last = &games.last().unwrap().record;
        assert_eq!((last.voters, last.candidates), (3, 3));
    }

    #[test]
    fn every_generated_record_is_valid() {
        for g in collect(&small()) {
            assert!(g.record.to_profile().is_ok(), "{}", g.file_name());
        }
    }

    #[test]
    fn same_seed_same_games() {
        assert_eq!(collect(&small()), collect(&small()));
        let other = GenerateConfig { seed: 8, ..small() };
        let a: Vec<_> = collect(&small()).into_iter().map(|g| g.record).collect();
        let b: Vec<_> = collect(&other).into_iter().map(|g| g.record).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_empty_grid() {
        let cfg = GenerateConfig { sizes: vec![], ..small() };
        assert!(matches!(generate_games(&cfg, |_| Ok(())), Err(PipelineError::Config(_))));
        let cfg = GenerateConfig { games_per_cell: 0, ..small() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = GenerateConfig { sizes: vec![2], games_per_cell: 1, ..small() };
        assert_eq!(write_games(&cfg, dir.path()).unwrap(), 2);
        assert!(dir.path().join("game1.json").is_file());
        assert!(dir.path().join("game2.json").is_file());
    }
}
