// crates/sv_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Best-response dynamics over a preference profile.
//!
//! Pure and deterministic: no RNG, no I/O. Everything here is a function of the
//! input `PreferenceProfile` and the chosen rule.

pub mod dynamics;
pub mod state;
pub mod strategy;

// Convenience re-exports (pipeline imports these from crate root)
pub use dynamics::{simulate, BestResponseEngine, DynamicsLog, Move, SimulationResult, ROUND_CAP};
pub use state::VoteState;
pub use strategy::{Borda, BordaBallot, Plurality, RuleStrategy};
