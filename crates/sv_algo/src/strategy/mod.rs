//! Rule strategies: how a declared vote is represented, scored and rewritten.
//!
//! The engine only talks to this trait, so it never needs to know whether a
//! voter's ballot is a single candidate (Plurality) or a full ranking (Borda).

use sv_core::{ElectoralRule, PreferenceProfile};

use crate::state::VoteState;

pub mod borda;
pub mod plurality;

pub use borda::{Borda, BordaBallot};
pub use plurality::Plurality;

/// Capability set the best-response engine drives.
///
/// Candidates and voters are 0-based indices throughout.
pub trait RuleStrategy {
    /// Per-voter declared vote.
    type Ballot: Clone + core::fmt::Debug;

    fn rule(&self) -> ElectoralRule;

    /// Truthful starting state.
    fn initialize(&self, profile: &PreferenceProfile) -> VoteState<Self::Ballot>;

    /// Candidate the voter is currently backing (their first choice on the ballot).
    fn current_vote(&self, ballot: &Self::Ballot) -> usize;

    /// Highest score, ties to the lowest candidate id.
    fn winner(&self, state: &VoteState<Self::Ballot>) -> usize {
        state.leader().0
    }

    /// The candidate `voter` would rather back given the current `winner`,
    /// or `None` if they keep their vote.
    fn best_deviation(
        &self,
        profile: &PreferenceProfile,
        voter: usize,
        state: &VoteState<Self::Ballot>,
        winner: usize,
    ) -> Option<usize>;

    /// Switch `voter` to `candidate`, keeping the score table consistent.
    fn apply_vote(
        &self,
        profile: &PreferenceProfile,
        voter: usize,
        candidate: usize,
        state: &mut VoteState<Self::Ballot>,
    );
}

/// Index of the first maximum. Earlier entries win ties, so feeding tallies in
/// the voter's preference order lets that order break ties.
pub(crate) fn stable_argmax<I>(tallies: I) -> Option<usize>
where
    I: IntoIterator<Item = u64>,
{
    let mut best: Option<(usize, u64)> = None;
    for (i, t) in tallies.into_iter().enumerate() {
        match best {
            Some((_, bt)) if t <= bt => {}
            _ => best = Some((i, t)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_keeps_first_of_equal_maxima() {
        assert_eq!(stable_argmax([1, 3, 3, 2]), Some(1));
        assert_eq!(stable_argmax([4, 4]), Some(0));
        assert_eq!(stable_argmax([0]), Some(0));
        assert_eq!(stable_argmax(core::iter::empty()), None);
    }
}
