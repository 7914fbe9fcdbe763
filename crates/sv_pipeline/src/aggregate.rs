//! AGGREGATE stage: per-rule statistics over a batch.
//!
//! Sums are kept as integers; means and ratios are exposed as fixed-point
//! tenths (`123` → `12.3`) rounded half-to-even, so the same batch always
//! yields byte-identical summaries. No floats.

use serde::{Deserialize, Serialize};
use sv_core::ElectoralRule;

use crate::batch::{BatchEntry, BatchOutcome};

/// Raw per-rule counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSummary {
    pub rule: ElectoralRule,
    pub games: u64,
    pub total_rounds: u64,
    pub max_rounds: u32,
    /// Games stopped by the round cap.
    pub non_converged: u64,
    /// Games whose final winner differs from the truthful winner.
    pub different_winners: u64,
    pub total_initial_score: u64,
    pub total_final_score: u64,
}

impl RuleSummary {
    fn empty(rule: ElectoralRule) -> Self {
        Self {
            rule,
            games: 0,
            total_rounds: 0,
            max_rounds: 0,
            non_converged: 0,
            different_winners: 0,
            total_initial_score: 0,
            total_final_score: 0,
        }
    }

    fn add(&mut self, e: &BatchEntry) {
        let r = &e.result;
        self.games += 1;
        self.total_rounds += u64::from(r.rounds_used);
        self.max_rounds = self.max_rounds.max(r.rounds_used);
        if !r.converged {
            self.non_converged += 1;
        }
        if r.winner_changed() {
            self.different_winners += 1;
        }
        self.total_initial_score += r.initial_score;
        self.total_final_score += r.final_score;
    }

    /// Sum of (final − initial) winner scores; may be negative.
    pub fn total_score_shift(&self) -> i128 {
        i128::from(self.total_final_score) - i128::from(self.total_initial_score)
    }

    /// Mean rounds per game, in tenths. `None` for an empty rule.
    pub fn mean_rounds_tenths(&self) -> Option<i128> {
        tenths(i128::from(self.total_rounds), i128::from(self.games))
    }

    /// Mean winner-score shift per game, in tenths.
    pub fn mean_score_shift_tenths(&self) -> Option<i128> {
        tenths(self.total_score_shift(), i128::from(self.games))
    }

    /// Mean shift relative to the mean final winner score, as a percentage in
    /// tenths. The game counts cancel, so this is shift / final over totals.
    pub fn score_shift_pct_tenths(&self) -> Option<i128> {
        if self.games == 0 {
            return None;
        }
        div_round_half_even(
            self.total_score_shift().checked_mul(1000)?,
            i128::from(self.total_final_score),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// One row per rule, in `ElectoralRule::ALL` order, including empty rows.
    pub rules: Vec<RuleSummary>,
    pub failures: u64,
}

impl BatchSummary {
    pub fn rule(&self, rule: ElectoralRule) -> Option<&RuleSummary> {
        self.rules.iter().find(|r| r.rule == rule)
    }

    pub fn total_games(&self) -> u64 {
        self.rules.iter().map(|r| r.games).sum()
    }
}

pub fn summarize(outcome: &BatchOutcome) -> BatchSummary {
    let mut rules: Vec<RuleSummary> = ElectoralRule::ALL.iter().copied().map(RuleSummary::empty).collect();
    for e in &outcome.entries {
        if let Some(row) = rules.iter_mut().find(|r| r.rule == e.electoral_rule) {
            row.add(e);
        }
    }
    BatchSummary {
        rules,
        failures: outcome.failures.len() as u64,
    }
}

/// `num / den` in tenths, rounded half-to-even. `None` if `den <= 0`.
pub fn tenths(num: i128, den: i128) -> Option<i128> {
    div_round_half_even(num.checked_mul(10)?, den)
}

fn div_round_half_even(num: i128, den: i128) -> Option<i128> {
    if den <= 0 {
        return None;
    }
    let q = num.div_euclid(den);
    let twice_r = num.rem_euclid(den) * 2;
    Some(match twice_r.cmp(&den) {
        std::cmp::Ordering::Less => q,
        std::cmp::Ordering::Greater => q + 1,
        std::cmp::Ordering::Equal => q + (q & 1),
    })
}
