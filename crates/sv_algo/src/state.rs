//! crates/sv_algo/src/state.rs
//! Mutable per-simulation vote state: one declared ballot per voter plus the
//! single authoritative score table those ballots add up to.
//!
//! Mutation entry points are crate-private; outside this crate the state is
//! read-only and only changes through `RuleStrategy::apply_vote`.

/// Declared ballots (`B` is rule-specific) and per-candidate score totals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteState<B> {
    ballots: Vec<B>,
    scores: Vec<u64>,
}

impl<B> VoteState<B> {
    /// Scores must already equal the sum of the ballots' contributions.
    pub(crate) fn from_parts(ballots: Vec<B>, scores: Vec<u64>) -> Self {
        debug_assert!(!scores.is_empty(), "at least one candidate");
        Self { ballots, scores }
    }

    #[inline]
    pub fn ballot(&self, voter: usize) -> &B {
        &self.ballots[voter]
    }

    #[inline]
    pub fn ballots(&self) -> &[B] {
        &self.ballots
    }

    #[inline]
    pub fn score(&self, candidate: usize) -> u64 {
        self.scores[candidate]
    }

    #[inline]
    pub fn scores(&self) -> &[u64] {
        &self.scores
    }

    /// Sum of all scores (conserved by every rule).
    pub fn total(&self) -> u64 {
        self.scores.iter().sum()
    }

    /// Highest-scoring candidate and its score. Ties go to the lowest index:
    /// only a strictly greater score displaces the current leader.
    pub fn leader(&self) -> (usize, u64) {
        let mut best = 0usize;
        for c in 1..self.scores.len() {
            if self.scores[c] > self.scores[best] {
                best = c;
            }
        }
        (best, self.scores[best])
    }

    /// Replace a voter's declared ballot, returning the previous one.
    #[inline]
    pub(crate) fn replace_ballot(&mut self, voter: usize, ballot: B) -> B {
        core::mem::replace(&mut self.ballots[voter], ballot)
    }

    #[inline]
    pub(crate) fn credit(&mut self, candidate: usize, points: u64) {
        self.scores[candidate] += points;
    }

    #[inline]
    pub(crate) fn debit(&mut self, candidate: usize, points: u64) {
        debug_assert!(self.scores[candidate] >= points, "score underflow for candidate {candidate}");
        self.scores[candidate] -= points;
    }
}
