// crates/sv_algo/src/dynamics.rs
//
// Best-response dynamics: repeat rounds until no voter wants to move or the
// round cap is reached.
//
// One round = compute the winner, scan voters 0..n-1, apply the FIRST
// deviation found and end the round there. The next round rescans from voter
// 0. Applying every deviating voter at once, or continuing the scan after a
// change, reaches different equilibria and must not be substituted.

use serde::{Deserialize, Serialize};
use sv_core::{CandidateId, ElectoralRule, PreferenceProfile};

use crate::state::VoteState;
use crate::strategy::{Borda, Plurality, RuleStrategy};

/// Default safety bound against cyclic dynamics.
pub const ROUND_CAP: u32 = 1000;

/// Outcome of one simulation run (one input record).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub initial_winner: CandidateId,
    pub initial_score: u64,
    pub final_winner: CandidateId,
    pub final_score: u64,
    /// Rounds executed, including the final no-change round. Always >= 1.
    pub rounds_used: u32,
    /// False iff the round cap stopped the run with a change still pending.
    pub converged: bool,
}

impl SimulationResult {
    pub fn winner_changed(&self) -> bool {
        self.initial_winner != self.final_winner
    }
}

/// One applied deviation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub round: u32,
    /// 0-based voter index (position in `voting_preferences`).
    pub voter: usize,
    pub from: CandidateId,
    pub to: CandidateId,
}

/// Ordered record of every deviation applied during a run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicsLog {
    pub moves: Vec<Move>,
}

/// Drives a `RuleStrategy` over a single profile.
#[derive(Clone, Debug)]
pub struct BestResponseEngine<'p, R> {
    rule: R,
    profile: &'p PreferenceProfile,
    round_cap: u32,
}

impl<'p, R: RuleStrategy> BestResponseEngine<'p, R> {
    pub fn new(rule: R, profile: &'p PreferenceProfile) -> Self {
        Self { rule, profile, round_cap: ROUND_CAP }
    }

    /// Override the round cap (clamped to at least one round).
    pub fn with_round_cap(mut self, cap: u32) -> Self {
        self.round_cap = cap.max(1);
        self
    }

    pub fn round_cap(&self) -> u32 {
        self.round_cap
    }

    pub fn run(&self) -> SimulationResult {
        self.run_inner(None).0
    }

    /// Same as `run`, also returning every applied move.
    pub fn run_with_log(&self) -> (SimulationResult, DynamicsLog) {
        let mut log = DynamicsLog::default();
        let (result, _) = self.run_inner(Some(&mut log));
        (result, log)
    }

    /// Run to a fixed point or the cap and hand back the final state, for
    /// callers that want to inspect it (e.g. fixed-point checks).
    pub fn run_to_state(&self) -> (SimulationResult, VoteState<R::Ballot>) {
        self.run_inner(None)
    }

    fn run_inner(&self, mut log: Option<&mut DynamicsLog>) -> (SimulationResult, VoteState<R::Ballot>) {
        let mut state = self.rule.initialize(self.profile);
        let (initial_winner, initial_score) = self.standing(&state);

        let mut round: u32 = 1;
        let mut changed = true;
        while changed && round <= self.round_cap {
            changed = match self.step(&mut state, round) {
                Some(mv) => {
                    if let Some(log) = log.as_deref_mut() {
                        log.moves.push(mv);
                    }
                    true
                }
                None => false,
            };
            round += 1;
        }

        let rounds_used = round - 1;
        let (final_winner, final_score) = self.standing(&state);
        tracing::debug!(
            rule = %self.rule.rule(),
            rounds_used,
            converged = !changed,
            "best-response dynamics halted"
        );

        let result = SimulationResult {
            initial_winner,
            initial_score,
            final_winner,
            final_score,
            rounds_used,
            converged: !changed,
        };
        (result, state)
    }

    /// Execute one round; returns the applied move, if any.
    fn step(&self, state: &mut VoteState<R::Ballot>, round: u32) -> Option<Move> {
        let winner = self.rule.winner(state);
        tracing::debug!(round, winner = winner + 1, score = state.score(winner), "round started");
        for voter in 0..self.profile.voters() {
            if let Some(to) = self.rule.best_deviation(self.profile, voter, state, winner) {
                let from = self.rule.current_vote(state.ballot(voter));
                self.rule.apply_vote(self.profile, voter, to, state);
                tracing::debug!(round, voter, from = from + 1, to = to + 1, "voter deviated");
                return Some(Move {
                    round,
                    voter,
                    from: CandidateId::from_index(from),
                    to: CandidateId::from_index(to),
                });
            }
        }
        None
    }

    fn standing(&self, state: &VoteState<R::Ballot>) -> (CandidateId, u64) {
        let w = self.rule.winner(state);
        (CandidateId::from_index(w), state.score(w))
    }
}

/// Rule-dispatching entry point used by the pipeline.
pub fn simulate(
    rule: ElectoralRule,
    profile: &PreferenceProfile,
    round_cap: u32,
) -> (SimulationResult, DynamicsLog) {
    match rule {
        ElectoralRule::Plurality => {
            BestResponseEngine::new(Plurality, profile).with_round_cap(round_cap).run_with_log()
        }
        ElectoralRule::Borda => {
            BestResponseEngine::new(Borda, profile).with_round_cap(round_cap).run_with_log()
        }
    }
}
