// crates/sv_algo/src/strategy/borda.rs
//
// Borda: each voter declares a full ranking; the candidate at rank r receives
// m-1-r points from that voter. A strategic voter only ever changes who sits
// at rank 0 of their declared ranking; everyone else keeps their true order.

use sv_core::{ElectoralRule, PreferenceProfile};

use super::{stable_argmax, RuleStrategy};
use crate::state::VoteState;

#[derive(Clone, Copy, Debug, Default)]
pub struct Borda;

/// A voter's declared ranking together with the points it hands out, so a
/// voter's contribution to any candidate is an O(1) lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BordaBallot {
    ranking: Vec<usize>,
    points: Vec<u64>,
}

impl BordaBallot {
    fn from_ranking(ranking: Vec<usize>) -> Self {
        let m = ranking.len();
        let mut points = vec![0u64; m];
        for (rank, &c) in ranking.iter().enumerate() {
            points[c] = (m - 1 - rank) as u64;
        }
        Self { ranking, points }
    }

    /// Declared ranking, most preferred first.
    #[inline]
    pub fn ranking(&self) -> &[usize] {
        &self.ranking
    }

    /// Points this ballot gives `candidate`.
    #[inline]
    pub fn points(&self, candidate: usize) -> u64 {
        self.points[candidate]
    }

    #[inline]
    pub fn top(&self) -> usize {
        self.ranking[0]
    }
}

/// `truth` with `candidate` lifted to rank 0, all others in their relative order.
fn promote(truth: &[usize], candidate: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(truth.len());
    out.push(candidate);
    out.extend(truth.iter().copied().filter(|&c| c != candidate));
    out
}

impl RuleStrategy for Borda {
    type Ballot = BordaBallot;

    fn rule(&self) -> ElectoralRule {
        ElectoralRule::Borda
    }

    fn initialize(&self, profile: &PreferenceProfile) -> VoteState<BordaBallot> {
        let mut scores = vec![0u64; profile.candidates()];
        let ballots: Vec<BordaBallot> = (0..profile.voters())
            .map(|v| {
                let ballot = BordaBallot::from_ranking(profile.ranking(v).to_vec());
                for (c, s) in scores.iter_mut().enumerate() {
                    *s += ballot.points(c);
                }
                ballot
            })
            .collect();
        VoteState::from_parts(ballots, scores)
    }

    #[inline]
    fn current_vote(&self, ballot: &BordaBallot) -> usize {
        ballot.top()
    }

    fn best_deviation(
        &self,
        profile: &PreferenceProfile,
        voter: usize,
        state: &VoteState<BordaBallot>,
        winner: usize,
    ) -> Option<usize> {
        let ballot = state.ballot(voter);
        let current = ballot.top();
        if current == winner {
            return None;
        }

        // Re-weight each alternative as if this voter put it first: drop the
        // voter's own points for it, then add the full top-rank weight unless
        // it is the sitting winner.
        let top_weight = (profile.candidates() - 1) as u64;
        let alt = profile.prefix_through(voter, winner);
        let pick = stable_argmax(alt.iter().map(|&c| {
            let base = state.score(c) - ballot.points(c);
            if c != winner { base + top_weight } else { base }
        }))?;

        let choice = alt[pick];
        (choice != current).then_some(choice)
    }

    fn apply_vote(
        &self,
        profile: &PreferenceProfile,
        voter: usize,
        candidate: usize,
        state: &mut VoteState<BordaBallot>,
    ) {
        let next = BordaBallot::from_ranking(promote(profile.ranking(voter), candidate));
        let old = state.replace_ballot(voter, next.clone());
        for c in 0..profile.candidates() {
            let (before, after) = (old.points(c), next.points(c));
            if after > before {
                state.credit(c, after - before);
            } else if before > after {
                state.debit(c, before - after);
            }
        }
    }
}
