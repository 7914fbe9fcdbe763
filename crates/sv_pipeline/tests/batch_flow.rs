// crates/sv_pipeline/tests/batch_flow.rs
// End-to-end: generate → batch → summarize over a temp directory.

use std::fs;

use sv_core::ElectoralRule;
use sv_io::{loader, records::GameRecord};
use sv_pipeline::{run_batch, summarize, write_games, GenerateConfig, RunConfig};

#[test]
fn generated_games_all_simulate_and_converge() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = GenerateConfig {
        sizes: vec![3, 5],
        games_per_cell: 3,
        rules: ElectoralRule::ALL.to_vec(),
        seed: 0x5EED,
    };
    let written = write_games(&cfg, dir.path()).unwrap();
    assert_eq!(written, 24);

    let outcome = run_batch(dir.path(), &RunConfig::default()).unwrap();
    assert!(outcome.failures.is_empty(), "{:?}", outcome.failures);
    assert_eq!(outcome.entries.len(), 24);

    // Natural order: game1, game2, ..., game10, ...
    let names: Vec<&str> = outcome.entries.iter().map(|e| e.game.as_str()).collect();
    assert_eq!(names[0], "game1.json");
    assert_eq!(names[9], "game10.json");

    for e in &outcome.entries {
        assert!(e.result.rounds_used >= 1);
        assert_eq!(e.game_sha256.len(), 64);
    }

    let summary = summarize(&outcome);
    assert_eq!(summary.total_games(), 24);
    assert_eq!(summary.rule(ElectoralRule::Plurality).unwrap().games, 12);
    assert_eq!(summary.rule(ElectoralRule::Borda).unwrap().games, 12);
}

#[test]
fn batch_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = GenerateConfig { sizes: vec![4], games_per_cell: 5, seed: 42, ..GenerateConfig::default() };
    write_games(&cfg, dir.path()).unwrap();

    let a = run_batch(dir.path(), &RunConfig::default()).unwrap();
    let b = run_batch(dir.path(), &RunConfig::default()).unwrap();
    assert_eq!(a, b);
    assert_eq!(summarize(&a), summarize(&b));
}

#[test]
fn bad_files_are_failures_not_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let good = GameRecord::new(ElectoralRule::Borda, 2, vec![vec![1, 2], vec![2, 1], vec![2, 1]]);
    loader::write_game(&dir.path().join("game1.json"), &good).unwrap();
    fs::write(dir.path().join("game2.json"), "not json").unwrap();
    let unknown = GameRecord { electoral_rule: "STV".into(), ..good.clone() };
    loader::write_game(&dir.path().join("game3.json"), &unknown).unwrap();
    let broken = GameRecord { voting_preferences: vec![vec![1, 3], vec![2, 1], vec![2, 1]], ..good };
    loader::write_game(&dir.path().join("game4.json"), &broken).unwrap();

    let outcome = run_batch(dir.path(), &RunConfig::default()).unwrap();
    assert_eq!(outcome.entries.len(), 1);
    assert_eq!(outcome.entries[0].game, "game1.json");
    let failed: Vec<&str> = outcome.failures.iter().map(|f| f.game.as_str()).collect();
    assert_eq!(failed, vec!["game2.json", "game3.json", "game4.json"]);
    assert!(outcome.failures[1].error.contains("unsupported electoral rule"));
    assert!(outcome.failures[2].error.contains("invalid game"));

    assert_eq!(summarize(&outcome).failures, 3);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(run_batch(&dir.path().join("absent"), &RunConfig::default()).is_err());
}
