//! Provides the [`Brancher`](super::Brancher) implementations of the crate.
mod first_fail;
mod limited_discrepancy;
mod max_marginal_strength;
mod sequence;

pub use first_fail::FirstFail;
pub use limited_discrepancy::LimitedDiscrepancy;
pub use limited_discrepancy::LimitedDiscrepancyStatistics;
pub use max_marginal_strength::MaxMarginalStrength;
pub use sequence::Sequence;
