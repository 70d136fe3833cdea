//! Schedule generation engine.
//!
//! The engine is a pure pipeline over data fetched through the
//! [`crate::catalog`] traits:
//!
//! 1. [`search`]: enumerate section combinations with backtracking,
//!    pruning time conflicts as partial assignments grow
//! 2. [`score`]: rate each complete candidate against the student's
//!    preference profile
//! 3. [`feasibility`]: annotate candidates whose between-class transfers
//!    are tight or long
//! 4. [`select`]: keep the best K, deterministically ordered and deduped
//!
//! Scoring and feasibility work entirely on prefetched data, so the search
//! hot loop is synchronous and allocation-light.

pub mod conflict;
pub mod error;
pub mod feasibility;
pub mod score;
pub mod search;
pub mod select;

#[cfg(test)]
mod tests;

pub use error::{NoScheduleReason, ScheduleError, ScheduleResult};
pub use score::{RatingsIndex, ScoringWeights};
pub use search::{ScheduleGenerator, SearchRequest};
pub use select::RankedCandidate;
