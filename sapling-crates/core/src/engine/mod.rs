//! The domain layer on which the search operates.
//!
//! The search itself only needs two capabilities from this layer: querying domains and applying
//! decisions which may fail with [`EmptyDomain`]. [`Domains`] provides both on top of reversible
//! sparse sets, and [`DomainContext::propagate`] is the hook through which a propagation engine
//! reacts to every decision.
mod domains;
mod error;
pub mod variables;

pub use domains::*;
pub use error::*;
