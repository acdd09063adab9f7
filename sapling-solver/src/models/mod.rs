//! Problems which the command line driver can search over.
//!
//! Every model is a [`DomainContext`](sapling_core::engine::DomainContext) together with the
//! variables to branch on.
mod binary;
mod queens;

pub use binary::Binary;
pub use queens::Queens;
