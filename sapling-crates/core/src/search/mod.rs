//! The depth-first search driver.
//!
//! [`DepthFirstSearch`] owns a context and a [`Brancher`](crate::branching::Brancher) and explores
//! the tree the brancher defines in depth-first order, left to right. It is the only component which
//! takes and restores checkpoints: every branch action runs right after a fresh checkpoint and is
//! undone by restoring it once its subtree has been explored.
mod depth_first_search;
mod objective;
mod search_statistics;

pub use depth_first_search::*;
pub use objective::*;
pub use search_statistics::*;
