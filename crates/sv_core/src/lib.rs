//! sv_core: Core types for the strategic voting simulator.
//!
//! This crate is **I/O-free**. It defines the stable types used across the
//! workspace (`sv_algo`, `sv_io`, `sv_pipeline`, `sv_report`, `sv_cli`).
//!
//! - Candidate ids: 1-based on the wire (`CandidateId`), 0-based indices inside
//!   the engine
//! - Electoral rules: `ElectoralRule` (`"Plurality"` | `"Borda"`)
//! - Validated, immutable `PreferenceProfile`
//! - Seedable RNG (ChaCha20) for synthetic game generation only
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod profile;
pub mod rng;

pub mod errors {
    use thiserror::Error;

    /// Errors for core-domain parsing.
    #[derive(Clone, Debug, Eq, PartialEq, Error)]
    pub enum CoreError {
        /// `electoral_rule` is neither "Plurality" nor "Borda".
        #[error("unsupported electoral rule: {0:?}")]
        UnsupportedRule(String),
        #[error("candidate id out of range: {0}")]
        InvalidCandidate(u32),
    }

    pub use crate::profile::ProfileError;
}

pub mod ids {
    //! Candidate identifiers.

    use core::fmt;

    #[cfg(feature = "serde")]
    use serde::{Deserialize, Serialize};

    use crate::errors::CoreError;

    /// Wire-facing candidate id (1..=m). Internally the engine uses
    /// `id.index()` (0..m) to address score tables.
    #[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct CandidateId(u32);

    impl CandidateId {
        pub fn new(id: u32) -> Result<Self, CoreError> {
            if id == 0 { Err(CoreError::InvalidCandidate(id)) } else { Ok(Self(id)) }
        }

        /// Map a 0-based engine index back to its wire id.
        #[inline]
        pub fn from_index(index: usize) -> Self {
            Self(index as u32 + 1)
        }

        #[inline]
        pub fn index(self) -> usize {
            (self.0 - 1) as usize
        }

        #[inline]
        pub fn get(self) -> u32 {
            self.0
        }
    }

    impl fmt::Display for CandidateId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }
}

pub mod rule {
    //! Electoral rule domain with explicit wire tokens.

    use core::fmt;
    use core::str::FromStr;

    #[cfg(feature = "serde")]
    use serde::{Deserialize, Serialize};

    use crate::errors::CoreError;

    #[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub enum ElectoralRule {
        #[cfg_attr(feature = "serde", serde(rename = "Plurality"))]
        Plurality,
        #[cfg_attr(feature = "serde", serde(rename = "Borda"))]
        Borda,
    }

    impl ElectoralRule {
        /// Every supported rule, in report order.
        pub const ALL: [ElectoralRule; 2] = [ElectoralRule::Plurality, ElectoralRule::Borda];

        pub fn as_str(self) -> &'static str {
            match self {
                ElectoralRule::Plurality => "Plurality",
                ElectoralRule::Borda => "Borda",
            }
        }
    }

    impl fmt::Display for ElectoralRule {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl FromStr for ElectoralRule {
        type Err = CoreError;

        /// Tokens are case-sensitive, exactly as the game records spell them.
        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "Plurality" => Ok(ElectoralRule::Plurality),
                "Borda" => Ok(ElectoralRule::Borda),
                other => Err(CoreError::UnsupportedRule(other.to_string())),
            }
        }
    }
}

pub use errors::{CoreError, ProfileError};
pub use ids::CandidateId;
pub use profile::PreferenceProfile;
pub use rule::ElectoralRule;
