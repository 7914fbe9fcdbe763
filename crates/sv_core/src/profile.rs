//! crates/sv_core/src/profile.rs
//! Immutable preference profile: n voters, m candidates, one strict ranking
//! per voter (most preferred first). Validated once at construction; the
//! engine relies on the permutation invariant without re-checking it.

use thiserror::Error;

/// Structural problems in a preference profile. Reported before any
/// simulation state is built.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ProfileError {
    #[error("profile must have at least one voter")]
    NoVoters,
    #[error("profile must have at least one candidate")]
    NoCandidates,
    #[error("declared {declared} voters but found {found} rankings")]
    VoterCountMismatch { declared: usize, found: usize },
    #[error("voter {voter}: ranking has {found} entries, expected {expected}")]
    RankingLength { voter: usize, expected: usize, found: usize },
    #[error("voter {voter}: candidate {candidate} is not in 1..={candidates}")]
    UnknownCandidate { voter: usize, candidate: u32, candidates: usize },
    #[error("voter {voter}: candidate {candidate} ranked more than once")]
    DuplicateCandidate { voter: usize, candidate: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreferenceProfile {
    candidates: usize,
    /// rankings[v] = 0-based candidate indices, most preferred first.
    rankings: Vec<Vec<usize>>,
    /// positions[v][c] = rank of candidate `c` in voter `v`'s true ranking.
    positions: Vec<Vec<usize>>,
}

impl PreferenceProfile {
    /// Build a profile from wire rankings (1-based candidate ids).
    pub fn new(
        voters: usize,
        candidates: usize,
        rankings: &[Vec<u32>],
    ) -> Result<Self, ProfileError> {
        if voters == 0 {
            return Err(ProfileError::NoVoters);
        }
        if candidates == 0 {
            return Err(ProfileError::NoCandidates);
        }
        if rankings.len() != voters {
            return Err(ProfileError::VoterCountMismatch { declared: voters, found: rankings.len() });
        }

        let mut ranked = Vec::with_capacity(voters);
        let mut positions = Vec::with_capacity(voters);
        for (voter, row) in rankings.iter().enumerate() {
            if row.len() != candidates {
                return Err(ProfileError::RankingLength {
                    voter,
                    expected: candidates,
                    found: row.len(),
                });
            }
            let mut pos = vec![usize::MAX; candidates];
            let mut order = Vec::with_capacity(candidates);
            for (rank, &raw) in row.iter().enumerate() {
                if raw == 0 || raw as usize > candidates {
                    return Err(ProfileError::UnknownCandidate { voter, candidate: raw, candidates });
                }
                let c = raw as usize - 1;
                if pos[c] != usize::MAX {
                    return Err(ProfileError::DuplicateCandidate { voter, candidate: raw });
                }
                pos[c] = rank;
                order.push(c);
            }
            ranked.push(order);
            positions.push(pos);
        }

        Ok(Self { candidates, rankings: ranked, positions })
    }

    #[inline]
    pub fn voters(&self) -> usize {
        self.rankings.len()
    }

    #[inline]
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    /// True ranking of `voter` as 0-based indices.
    #[inline]
    pub fn ranking(&self, voter: usize) -> &[usize] {
        &self.rankings[voter]
    }

    /// Every candidate `voter` weakly prefers to `c`, in preference order,
    /// ending with `c` itself.
    #[inline]
    pub fn prefix_through(&self, voter: usize, c: usize) -> &[usize] {
        &self.rankings[voter][..=self.positions[voter][c]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_zero_based_rankings() {
        let p = PreferenceProfile::new(2, 3, &[vec![2, 1, 3], vec![3, 2, 1]]).unwrap();
        assert_eq!(p.voters(), 2);
        assert_eq!(p.candidates(), 3);
        assert_eq!(p.ranking(0), &[1, 0, 2]);
        assert_eq!(p.prefix_through(1, 0), &[2, 1, 0]);
        assert_eq!(p.prefix_through(0, 0), &[1, 0]);
        assert_eq!(p.prefix_through(1, 2), &[2]);
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(PreferenceProfile::new(0, 2, &[]), Err(ProfileError::NoVoters));
        assert_eq!(PreferenceProfile::new(1, 0, &[vec![]]), Err(ProfileError::NoCandidates));
    }

    #[test]
    fn rejects_wrong_ranking_count() {
        let err = PreferenceProfile::new(3, 2, &[vec![1, 2], vec![2, 1]]).unwrap_err();
        assert_eq!(err, ProfileError::VoterCountMismatch { declared: 3, found: 2 });
    }

    #[test]
    fn rejects_non_permutations() {
        let short = PreferenceProfile::new(1, 3, &[vec![1, 2]]).unwrap_err();
        assert!(matches!(short, ProfileError::RankingLength { voter: 0, expected: 3, found: 2 }));

        let dup = PreferenceProfile::new(2, 2, &[vec![1, 2], vec![2, 2]]).unwrap_err();
        assert_eq!(dup, ProfileError::DuplicateCandidate { voter: 1, candidate: 2 });

        let zero = PreferenceProfile::new(1, 2, &[vec![0, 1]]).unwrap_err();
        assert!(matches!(zero, ProfileError::UnknownCandidate { candidate: 0, .. }));

        let high = PreferenceProfile::new(1, 2, &[vec![1, 3]]).unwrap_err();
        assert!(matches!(high, ProfileError::UnknownCandidate { candidate: 3, .. }));
    }
}
