// crates/sv_algo/src/strategy/plurality.rs
//
// Plurality: each voter declares one candidate; a candidate's score is the
// number of voters declaring it.

use sv_core::{ElectoralRule, PreferenceProfile};

use super::{stable_argmax, RuleStrategy};
use crate::state::VoteState;

#[derive(Clone, Copy, Debug, Default)]
pub struct Plurality;

impl RuleStrategy for Plurality {
    type Ballot = usize;

    fn rule(&self) -> ElectoralRule {
        ElectoralRule::Plurality
    }

    fn initialize(&self, profile: &PreferenceProfile) -> VoteState<usize> {
        let mut scores = vec![0u64; profile.candidates()];
        let ballots: Vec<usize> = (0..profile.voters())
            .map(|v| {
                let top = profile.ranking(v)[0];
                scores[top] += 1;
                top
            })
            .collect();
        VoteState::from_parts(ballots, scores)
    }

    #[inline]
    fn current_vote(&self, ballot: &usize) -> usize {
        *ballot
    }

    fn best_deviation(
        &self,
        profile: &PreferenceProfile,
        voter: usize,
        state: &VoteState<usize>,
        winner: usize,
    ) -> Option<usize> {
        let current = *state.ballot(voter);
        if current == winner {
            return None;
        }

        // Candidates the voter likes at least as much as the winner; an
        // alternative other than the current vote and the winner is credited
        // with the one vote this voter would bring.
        let alt = profile.prefix_through(voter, winner);
        let pick = stable_argmax(alt.iter().map(|&c| {
            let boost = u64::from(c != current && c != winner);
            state.score(c) + boost
        }))?;

        let choice = alt[pick];
        (choice != current).then_some(choice)
    }

    fn apply_vote(
        &self,
        _profile: &PreferenceProfile,
        voter: usize,
        candidate: usize,
        state: &mut VoteState<usize>,
    ) {
        let old = state.replace_ballot(voter, candidate);
        state.debit(old, 1);
        state.credit(candidate, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(m: usize, rows: &[&[u32]]) -> PreferenceProfile {
        let rows: Vec<Vec<u32>> = rows.iter().map(|r| r.to_vec()).collect();
        PreferenceProfile::new(rows.len(), m, &rows).unwrap()
    }

    #[test]
    fn truthful_init_counts_first_choices() {
        let p = profile(3, &[&[2, 1, 3], &[2, 3, 1], &[3, 1, 2]]);
        let st = Plurality.initialize(&p);
        assert_eq!(st.ballots(), &[1, 1, 2]);
        assert_eq!(st.scores(), &[0, 2, 1]);
        assert_eq!(Plurality.winner(&st), 1);
    }

    #[test]
    fn winner_supporters_never_deviate() {
        let p = profile(2, &[&[1, 2], &[1, 2], &[2, 1]]);
        let st = Plurality.initialize(&p);
        assert_eq!(Plurality.best_deviation(&p, 0, &st, 0), None);
        assert_eq!(Plurality.best_deviation(&p, 1, &st, 0), None);
    }

    #[test]
    fn losing_voter_compromises_on_winner() {
        // Voter 2 backs candidate 2 (score 1) against winner 1 (score 2):
        // alt = [2, 1], tallies [1, 2] -> switches to 1.
        let p = profile(2, &[&[1, 2], &[1, 2], &[2, 1]]);
        let st = Plurality.initialize(&p);
        assert_eq!(Plurality.best_deviation(&p, 2, &st, 0), Some(0));
    }

    #[test]
    fn boost_favours_a_preferred_contender() {
        // Scores: c1=2, c2=2 (c1 wins on id), c3=1. Voter 4 truly ranks
        // 3 > 2 > 1 and currently backs 3. alt = [3, 2, 1]:
        // tally(3)=1, tally(2)=2+1=3, tally(1)=2 -> moves to 2.
        let p = profile(3, &[&[1, 2, 3], &[1, 3, 2], &[2, 1, 3], &[2, 3, 1], &[3, 2, 1]]);
        let st = Plurality.initialize(&p);
        assert_eq!(st.scores(), &[2, 2, 1]);
        assert_eq!(Plurality.best_deviation(&p, 4, &st, 0), Some(1));
    }

    #[test]
    fn apply_vote_moves_one_point() {
        let p = profile(2, &[&[1, 2], &[2, 1]]);
        let mut st = Plurality.initialize(&p);
        Plurality.apply_vote(&p, 1, 0, &mut st);
        assert_eq!(st.scores(), &[2, 0]);
        assert_eq!(*st.ballot(1), 0);
        assert_eq!(st.total(), 2);
    }
}
