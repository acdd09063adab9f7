//! Containers indexed by typed handles.
mod keyed_vec;

pub use keyed_vec::*;
