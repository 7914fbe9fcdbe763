//! Wire-facing game record (input to one simulation run).
//!
//! Mirrors the JSON files produced by the game generator:
//! `{voters, candidates, electoral_rule, voting_preferences}`.
//! The rule stays a raw string here so that an unknown rule surfaces as an
//! unsupported-rule error in the pipeline rather than as a JSON shape error.

use serde::{Deserialize, Serialize};
use sv_core::{ElectoralRule, PreferenceProfile, ProfileError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub voters: u64,
    pub candidates: u64,
    pub electoral_rule: String,
    /// One ranking per voter, 1-based candidate ids, most preferred first.
    pub voting_preferences: Vec<Vec<u32>>,
}

impl GameRecord {
    pub fn new(rule: ElectoralRule, candidates: u32, voting_preferences: Vec<Vec<u32>>) -> Self {
        Self {
            voters: voting_preferences.len() as u64,
            candidates: u64::from(candidates),
            electoral_rule: rule.as_str().to_string(),
            voting_preferences,
        }
    }

    /// Validate the record's shape into an immutable profile.
    pub fn to_profile(&self) -> Result<PreferenceProfile, ProfileError> {
        PreferenceProfile::new(
            usize::try_from(self.voters).unwrap_or(usize::MAX),
            usize::try_from(self.candidates).unwrap_or(usize::MAX),
            &self.voting_preferences,
        )
    }
}
