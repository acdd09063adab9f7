//! Contains the strategies which define the shape of the search tree.
//!
//! A [`Brancher`] is asked by the [`DepthFirstSearch`] for the children of the current node: an
//! ordered list of [`BranchAction`]s which are tried from left to right. An empty list marks the
//! node as a solution. Branchers come in two flavours:
//! - heuristics, which select a variable and split its domain, e.g. [`FirstFail`] and
//!   [`MaxMarginalStrength`];
//! - combinators, which shape the tree produced by other branchers, e.g. [`Sequence`] and
//!   [`LimitedDiscrepancy`].
//!
//! Branchers and branch actions must never take or restore checkpoints themselves; that is the sole
//! responsibility of the search driver. Any state a brancher needs to keep along the current path
//! has to live in reversible cells so that it is restored together with everything else.
mod brancher;
pub mod branchers;
mod selection;
pub mod tie_breaking;

pub use brancher::*;
#[cfg(doc)]
use branchers::*;
pub use selection::select_min;

#[cfg(doc)]
use crate::search::DepthFirstSearch;
